//! # Math Module
//!
//! Small, self-contained linear algebra used by the transform hierarchy and the
//! camera: [`Vector3`] and the column-major [`Matrix4`].
//!
//! Both types convert to and from their `cgmath` counterparts so values can
//! cross into rendering code that already speaks `cgmath`.

pub mod matrix4;
pub mod vector3;

pub use matrix4::Matrix4;
pub use vector3::Vector3;
