//! Player pawn компоненты: Player marker, CameraRig, MoveIntent

use bevy::prelude::*;

/// Player marker (управляемый pawn)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Third-person camera rig (boom + controller rotation)
///
/// Рендер камеры — в presentation layer; мы владеем только yaw/pitch,
/// из них строится aim direction для бросков и trajectory prediction.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Yaw контроллера (радианы, вокруг Y)
    pub yaw: f32,
    /// Pitch контроллера (радианы, clamped)
    pub pitch: f32,
    /// Длина camera boom (метры)
    pub arm_length: f32,
    /// Чувствительность look input
    pub look_sensitivity: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            arm_length: 4.0, // было 400 cm
            look_sensitivity: 0.01,
        }
    }
}

impl CameraRig {
    pub const PITCH_LIMIT: f32 = 1.4; // чуть меньше 90°

    /// Направление взгляда контроллера (forward = -Z при yaw=pitch=0)
    pub fn aim_direction(&self) -> Vec3 {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0) * Vec3::NEG_Z
    }

    /// Применяет look delta с clamp по pitch
    pub fn apply_look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.look_sensitivity;
        self.pitch = (self.pitch - delta.y * self.look_sensitivity)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Forward на плоскости XZ (для movement input)
    pub fn ground_forward(&self) -> Vec3 {
        let forward = self.aim_direction();
        Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero()
    }

    /// Right на плоскости XZ
    pub fn ground_right(&self) -> Vec3 {
        self.ground_forward().cross(Vec3::Y).normalize_or_zero()
    }
}

/// Накопленный movement intent текущего тика (из PlayerInput::Move)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MoveIntent {
    /// Input axes: x = strafe, y = forward
    pub axes: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_clamped() {
        let mut rig = CameraRig::default();
        rig.apply_look(Vec2::new(0.0, -1000.0));
        assert!(rig.pitch <= CameraRig::PITCH_LIMIT);

        rig.apply_look(Vec2::new(0.0, 1000.0));
        assert!(rig.pitch >= -CameraRig::PITCH_LIMIT);
    }

    #[test]
    fn test_aim_direction_default_is_forward() {
        let rig = CameraRig::default();
        let dir = rig.aim_direction();
        assert!((dir - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_ground_forward_is_horizontal() {
        let mut rig = CameraRig::default();
        rig.pitch = 0.9;
        let fwd = rig.ground_forward();
        assert_eq!(fwd.y, 0.0);
        assert!((fwd.length() - 1.0).abs() < 1e-5);
    }
}
