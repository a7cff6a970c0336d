/// fly3d Core Library - math, cameras and mesh loading
///
/// This library holds the backend-independent parts of the viewer: a small
/// vector/quaternion/matrix library, free-fly and walking cameras, perspective
/// projection, frame pacing and an OBJ loader producing interleaved vertex
/// buffers.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod input;
pub mod matrix;
pub mod obj;
pub mod pacing;
pub mod projection;
pub mod quaternion;
pub mod settings;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::{Camera, CameraMode, CameraRig, FreeFlyCamera, WalkingCamera};
pub use error::AssetError;
pub use geometry::{MeshVertex, VertexBuffer, VertexBufferBuilder};
pub use input::{InputState, Key};
pub use matrix::{mat_mul, Mat4};
pub use obj::{parse_obj, ObjLoader};
pub use pacing::FramePacer;
pub use projection::Projection;
pub use quaternion::{quat_mul, Quat};
pub use settings::CameraSettings;
pub use transform::Transform;
pub use vector::{cross, edge, Vec3};
