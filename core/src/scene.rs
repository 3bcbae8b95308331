use ultraviolet::vec::{
	Vec2,
	Vec3
};

/// Triangle made of three raw, 0-based vertex indices
pub type Triangle = [i32; 3];

/// A single decoded mesh object.
///
/// All per-vertex attributes have the same length. Attributes missing from the
/// source stay zero-filled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
	pub positions: Vec<Vec3>,
	pub normals: Vec<Vec3>,
	pub uvs: Vec<Vec2>,
	/// Flat triangle list, 3 indices per face
	pub indices: Vec<i32>,
}

impl Mesh {
	/// Creates a mesh with `count` zeroed vertices and no faces
	pub fn with_vertices(count: usize) -> Mesh {
		Mesh {
			positions: vec![Vec3::zero(); count],
			normals: vec![Vec3::zero(); count],
			uvs: vec![Vec2::zero(); count],
			indices: vec![],
		}
	}

	pub fn vertex_count(&self) -> usize {
		self.positions.len()
	}

	/// Iterates over complete triangles. A trailing partial triangle is dropped.
	pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
		self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
	}

	pub fn triangle_count(&self) -> usize {
		self.indices.len() / 3
	}
}
