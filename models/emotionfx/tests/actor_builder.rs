//! Builds synthetic `.xac` actors for the integration tests.

use byteorder::{
	LE,
	WriteBytesExt
};

pub const MESH: i32 = 1;
pub const METADATA: i32 = 7;
pub const MATERIAL_TOTALS: i32 = 13;

/// Mesh chunk body with position, normal and UV layers
pub struct MeshData {
	pub positions: Vec<[f32; 3]>,
	pub normals: Vec<[f32; 3]>,
	pub uvs: Vec<[f32; 2]>,
	pub indices: Vec<i32>,
	/// Overrides the trailing face/vertex counts
	pub check: Option<(i32, i32)>,
}

impl MeshData {
	/// A single triangle facing +Z
	pub fn triangle() -> MeshData {
		MeshData {
			positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
			normals: vec![[0.0, 0.0, 1.0]; 3],
			uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.25]],
			indices: vec![0, 1, 2],
			check: None,
		}
	}

	/// Two triangles sharing an edge
	pub fn quad() -> MeshData {
		MeshData {
			positions: vec![[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [1.0, 1.0, 0.0], [-1.0, 1.0, 0.0]],
			normals: vec![[0.0, 0.0, 1.0]; 4],
			uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
			indices: vec![0, 1, 2, 2, 3, 0],
			check: None,
		}
	}

	pub fn bytes(&self) -> Vec<u8> {
		let verts = self.positions.len() as i32;
		let faces = self.indices.len() as i32;

		let mut out = vec![0; 8];
		out.write_i32::<LE>(verts).unwrap();
		out.write_i32::<LE>(faces).unwrap();
		out.extend_from_slice(&[0; 16]);
		out.write_i32::<LE>(3).unwrap();
		out.extend_from_slice(&[0; 4]);
		out.extend(std::iter::repeat(0).take(verts as usize * 4));

		layer(&mut out, 0, 12);
		for p in self.positions.iter() {
			floats(&mut out, p);
		}

		layer(&mut out, 1, 12);
		for n in self.normals.iter() {
			floats(&mut out, n);
		}

		layer(&mut out, 3, 8);
		for uv in self.uvs.iter() {
			floats(&mut out, uv);
		}

		let (faces_check, verts_check) = self.check.unwrap_or((faces, verts));
		out.write_i32::<LE>(faces_check).unwrap();
		out.write_i32::<LE>(verts_check).unwrap();
		out.extend_from_slice(&[0; 8]);

		for i in self.indices.iter() {
			out.write_i32::<LE>(*i).unwrap();
		}
		out
	}
}

fn layer(out: &mut Vec<u8>, id: i32, size: i32) {
	out.write_i32::<LE>(id).unwrap();
	out.write_i32::<LE>(size).unwrap();
	out.extend_from_slice(&[0; 4]);
}

fn floats(out: &mut Vec<u8>, values: &[f32]) {
	for v in values.iter() {
		out.write_f32::<LE>(*v).unwrap();
	}
}

pub fn chunk(id: i32, payload: &[u8]) -> Vec<u8> {
	let mut out = vec![];
	out.write_i32::<LE>(id).unwrap();
	out.write_i32::<LE>(payload.len() as i32).unwrap();
	out.write_i32::<LE>(1).unwrap();
	out.extend_from_slice(payload);
	out
}

pub fn totals(count: i32) -> Vec<u8> {
	let mut payload = vec![0; 8];
	payload.write_i32::<LE>(count).unwrap();
	chunk(MATERIAL_TOTALS, &payload)
}

pub fn actor(chunks: &[Vec<u8>]) -> Vec<u8> {
	let mut out = b"XAC \x01\x00\x00\x00".to_vec();
	for c in chunks.iter() {
		out.extend_from_slice(c);
	}
	out
}
