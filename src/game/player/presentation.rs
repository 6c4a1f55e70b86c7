// Mapping from controller state to what the renderer and collision layer see

use glam::Vec2;

use super::actor::ActorState;
use super::state::{PlayerState, TextureVariant};

/// Local offset of the slide hitbox when facing right
const SLIDE_SHAPE_OFFSET: Vec2 = Vec2::new(-1.5, 3.0);
/// Local offset of the wall probe when facing right
const WALL_PROBE_OFFSET: Vec2 = Vec2::new(7.5, 3.0);

/// Which hitbox is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionShape {
    #[default]
    Standing,
    /// Short box used while sliding under low ceilings
    Sliding,
}

/// Everything downstream collaborators need after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationFrame {
    pub animation_clip: &'static str,
    pub texture: TextureVariant,
    pub sprite_flipped: bool,
    pub active_shape: CollisionShape,
    pub wall_probe_enabled: bool,
    pub visible: bool,
    pub animation_paused: bool,
    pub sprite_offset_y: f32,
    pub slide_shape_offset: Vec2,
    pub wall_probe_offset: Vec2,
}

/// Texture for the current fire-pose timer
pub fn texture_for(fire_pose: u32) -> TextureVariant {
    if fire_pose > 0 {
        TextureVariant::Shoot
    } else {
        TextureVariant::Normal
    }
}

/// Which facing flag is drawn: the requested one while shooting on a ladder
pub fn rendered_facing(state: PlayerState, fire_pose: u32, sprite: bool, actual: bool) -> bool {
    if state.is_climbing() && fire_pose > 0 {
        actual
    } else {
        sprite
    }
}

/// Swap hitboxes for the state the tick ended in
///
/// Hurt keeps whatever box was active so a hit taken mid-slide under a
/// ceiling never pushes the standing box into it.
pub fn update_shapes(actor: &mut ActorState) {
    match actor.state() {
        PlayerState::Slide => actor.active_shape = CollisionShape::Sliding,
        PlayerState::Hurt => {}
        _ => actor.active_shape = CollisionShape::Standing,
    }
}

/// Mirror a right-facing local offset to the side the shapes face
fn mirrored(offset: Vec2, facing_left: bool) -> Vec2 {
    if facing_left {
        Vec2::new(-offset.x, offset.y)
    } else {
        offset
    }
}

/// Build the frame for the actor as it stands
pub fn present(actor: &ActorState) -> PresentationFrame {
    PresentationFrame {
        animation_clip: actor.presented_state().clip_name(),
        texture: texture_for(actor.timers.fire_pose),
        sprite_flipped: actor.rendered_facing,
        active_shape: actor.active_shape,
        wall_probe_enabled: actor.active_shape == CollisionShape::Standing,
        visible: actor.visible,
        animation_paused: actor.animation_paused,
        sprite_offset_y: actor.sprite_offset_y,
        slide_shape_offset: mirrored(SLIDE_SHAPE_OFFSET, actor.shape_facing_left),
        wall_probe_offset: mirrored(WALL_PROBE_OFFSET, actor.shape_facing_left),
    }
}
