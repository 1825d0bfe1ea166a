//! Renderable content
//!
//! Payloads the scene graph validates and culls without knowing how they
//! are drawn:
//! - Geometry: interleaved vertex data plus memoized bounds
//! - Material: shading kind and the flags that route draw order
//! - Mesh / InstancedMesh / Sprite: what a renderable node carries

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod sprite;

pub use geometry::{AttributeKind, Geometry, GeometryAttribute, PrimitiveType};
pub use material::{
    Blending, Material, MaterialKind, MaterialType, PhongParams, SpriteParams, UnlitParams,
};
pub use mesh::{InstancedMesh, Mesh};
pub use sprite::Sprite;
