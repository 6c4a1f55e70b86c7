// Sprite animation playback for the player clips

use std::collections::HashMap;

use log::warn;

use super::presentation::PresentationFrame;
use super::AnimationError;

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name the controller refers to the clip by (e.g. "run", "climb-top")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Clip that plays once and reports completion
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Receiver of the clip requests a tick produces
pub trait AnimationSink {
    /// Switch to `clip`; replaying the current clip does not restart it
    fn play(&mut self, clip: &str) -> Result<(), AnimationError>;

    /// Freeze or resume the current clip without losing its position
    fn set_paused(&mut self, paused: bool);

    /// Mirror the sprite horizontally
    fn set_flipped(&mut self, _flipped: bool) {}
}

/// Push a tick's presentation into a sink
pub fn apply_frame<S: AnimationSink + ?Sized>(
    sink: &mut S,
    frame: &PresentationFrame,
) -> Result<(), AnimationError> {
    sink.play(frame.animation_clip)?;
    sink.set_paused(frame.animation_paused);
    sink.set_flipped(frame.sprite_flipped);
    Ok(())
}

/// Plays clips from a catalogue and reports when one-shot clips finish
#[derive(Debug)]
pub struct AnimationPlayer {
    animations: HashMap<String, AnimationClip>,
    current_animation: String,
    current_frame: usize,
    frame_timer: f32,
    playing: bool,
    paused: bool,
    flip_horizontal: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: false,
            paused: false,
            flip_horizontal: false,
        }
    }

    /// Create a player holding every clip the controller can request
    pub fn with_player_clips() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("teleport", 1, 1.0));
        player.add_animation(AnimationClip::one_shot("teleport-in", 3, 15.0));
        player.add_animation(AnimationClip::one_shot("teleport-out", 3, 15.0));
        player.add_animation(AnimationClip::looping("idle", 2, 2.0));
        player.add_animation(AnimationClip::one_shot("step", 1, 15.0));
        player.add_animation(AnimationClip::looping("run", 4, 10.0));
        player.add_animation(AnimationClip::looping("jump", 1, 1.0));
        player.add_animation(AnimationClip::looping("slide", 1, 1.0));
        player.add_animation(AnimationClip::looping("climb", 2, 8.0));
        player.add_animation(AnimationClip::looping("climb-top", 1, 1.0));
        player.add_animation(AnimationClip::looping("hurt", 2, 15.0));

        player
    }

    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, name: &str) -> Result<(), AnimationError> {
        if !self.animations.contains_key(name) {
            return Err(AnimationError::UnknownClip(name.to_string()));
        }
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
        Ok(())
    }

    /// Advance playback by `dt` seconds
    ///
    /// Returns `"<clip>-complete"` on the update where a one-shot clip ends.
    pub fn update(&mut self, dt: f32) -> Option<String> {
        if !self.playing || self.paused {
            return None;
        }

        let clip = self.animations.get(&self.current_animation)?;

        self.frame_timer += dt;
        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                    return Some(format!("{}-complete", clip.name));
                }
            }
        }

        None
    }

    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }
}

impl AnimationSink for AnimationPlayer {
    fn play(&mut self, clip: &str) -> Result<(), AnimationError> {
        if self.current_animation == clip {
            return Ok(());
        }
        self.play_from_start(clip).inspect_err(|err| warn!("{}", err))
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn set_flipped(&mut self, flipped: bool) {
        self.flip_horizontal = flipped;
    }
}
