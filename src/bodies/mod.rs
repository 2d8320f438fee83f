mod rigid_body;
mod material;
mod body_type;

pub use self::rigid_body::RigidBody;
pub use self::material::Material;
pub use self::body_type::RigidBodyType;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of rigid bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct BodyFlags: u32 {
            /// Body is affected by the world's gravity
            const AFFECTED_BY_GRAVITY = 0x01;

            /// Body never rotates; angular velocity and angle are left untouched
            const FIXED_ROTATION = 0x02;
        }
    }
}
