//! EMotion FX actor files (`.xac`).
//!
//! An actor is a 4-byte magic, 4 bytes of version data and a flat sequence of
//! chunks. Every chunk starts with an id, a byte length and a version. Only mesh
//! chunks are decoded; the material totals chunk provides the number of meshes
//! to expect, everything else is skipped by length.

use bitflags::bitflags;

use std::fmt::{
	Display,
	Formatter,
	self
};

#[cfg(feature = "import")]
use import::XacImportError;

pub const MAGIC: &str = "XAC ";
/// Bytes after the magic, holding format version and endianness
pub const HEADER_INFO_LEN: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(i32)]
pub enum ChunkId {
	Mesh = 1,
	MaterialDefinition = 3,
	ShaderMaterial = 5,
	Metadata = 7,
	NodeHierarchy = 11,
	MaterialTotals = 13,
}

impl ChunkId {
	pub fn from_i32(id: i32) -> Option<ChunkId> {
		match id {
			1 => Some(ChunkId::Mesh),
			3 => Some(ChunkId::MaterialDefinition),
			5 => Some(ChunkId::ShaderMaterial),
			7 => Some(ChunkId::Metadata),
			11 => Some(ChunkId::NodeHierarchy),
			13 => Some(ChunkId::MaterialTotals),
			_ => None,
		}
	}
}

/// Vertex attribute layer types found in mesh chunks.
/// Only positions, normals and UVs are decoded; other layers are skipped by size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(i32)]
pub enum VertexAttr {
	Position = 0,
	Normal,
	Tangent,
	UvCoord,
	Color32,
	InfluenceRange,
	Color128,
}

impl VertexAttr {
	pub fn from_i32(id: i32) -> Option<VertexAttr> {
		match id {
			0 => Some(VertexAttr::Position),
			1 => Some(VertexAttr::Normal),
			2 => Some(VertexAttr::Tangent),
			3 => Some(VertexAttr::UvCoord),
			4 => Some(VertexAttr::Color32),
			5 => Some(VertexAttr::InfluenceRange),
			6 => Some(VertexAttr::Color128),
			_ => None,
		}
	}
}

bitflags! {
	/// Attribute layers already taken for the mesh being decoded
	pub struct Captured: u8 {
		const POSITION = 1;
		const NORMAL = 2;
		const UV = 4;
	}

	pub struct ImportFlag: u32 {
		/// Consume the face indices of meshes failing the count check
		const RESYNC_ON_CHECK_FAILURE = 1;
	}
}

impl Default for ImportFlag {
	fn default() -> Self {
		ImportFlag::RESYNC_ON_CHECK_FAILURE
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportCfg {
	pub flags: ImportFlag,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkHeader {
	pub id: i32,
	pub length: i32,
	pub version: i32,
}

impl ChunkHeader {
	pub const SIZE: usize = 12;

	/// Reads the next chunk header. Returns `None` at a clean end of stream.
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<Option<ChunkHeader>, XacImportError>
	where
		R: std::io::Read,
	{
		use byteorder::{
			LE,
			ReadBytesExt
		};

		use xac2obj_core::io_ext::ReadBinExt;

		let mut raw = [0; ChunkHeader::SIZE];
		if !buf.read_exact_or_none(&mut raw)? {
			return Ok(None);
		}

		let raw = &mut &raw[..];
		Ok(Some(ChunkHeader {
			id: raw.read_i32::<LE>()?,
			length: raw.read_i32::<LE>()?,
			version: raw.read_i32::<LE>()?,
		}))
	}
}

impl Display for ChunkHeader {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{} (length: {}, version: {})", self.id, self.length, self.version)
	}
}

/// Header of one per-vertex attribute layer inside a mesh chunk
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttrBlock {
	pub id: i32,
	/// Bytes per vertex
	pub size: i32,
}

impl AttrBlock {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<AttrBlock, XacImportError>
	where
		R: std::io::Read,
	{
		use byteorder::{
			LE,
			ReadBytesExt
		};

		use xac2obj_core::io_ext::ReadBinExt;

		let id = buf.read_i32::<LE>()?;
		let size = buf.read_i32::<LE>()?;
		buf.skip(4)?;

		Ok(AttrBlock {
			id: id,
			size: size,
		})
	}
}

/// Trailing mesh counts that disagree with the mesh header
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountMismatch {
	pub faces: i32,
	pub faces_check: i32,
	pub vertices: i32,
	pub vertices_check: i32,
}

impl Display for CountMismatch {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "Face/Vertex check failed (faces: {} != {}, vertices: {} != {})",
			self.faces, self.faces_check, self.vertices, self.vertices_check)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum MeshChunk {
	Decoded(xac2obj_core::scene::Mesh),
	Rejected(CountMismatch),
}

/// Outcome of a whole file
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
	/// Mesh count announced by the material totals chunk, `0` if absent
	pub declared_objects: i32,
	pub exported: usize,
	pub rejected: usize,
	pub unknown_chunks: usize,
}

impl Summary {
	/// Whether the announced number of meshes has been exported
	pub fn is_complete(&self) -> bool {
		self.declared_objects > 0 && self.exported as i64 == self.declared_objects as i64
	}
}

#[cfg(feature = "import")]
pub mod import {
	use byteorder::{
		LE,
		ReadBytesExt
	};

	use std::io::{
		self,
		Read
	};

	use thiserror::Error;
	use tracing::{
		debug,
		warn
	};

	use ultraviolet::vec::{
		Vec2,
		Vec3
	};

	use xac2obj_core::{
		io_ext::ReadBinExt,
		scene::Mesh
	};

	use super::*;

	#[derive(Error, Debug)]
	pub enum XacImportError {
		#[error("Negative {field}: {value}")]
		Count {
			field: &'static str,
			value: i32,
		},
		#[error("Unable to export object {index}")]
		Export {
			index: usize,
			source: io::Error,
		},
		#[error("I/O error")]
		IO {
			source: io::Error,
		},
		#[error("Not a valid XAC file: {0:?}")]
		Magic(String),
		#[error("Unexpected end of stream")]
		ShortRead {
			source: io::Error,
		},
	}

	impl From<io::Error> for XacImportError {
		fn from(source: io::Error) -> Self {
			match source.kind() {
				io::ErrorKind::UnexpectedEof => XacImportError::ShortRead { source },
				_ => XacImportError::IO { source },
			}
		}
	}

	/// Turns a signed count from the stream into a usable length
	fn count(field: &'static str, value: i32) -> Result<u64, XacImportError> {
		u64::try_from(value).map_err(|_| XacImportError::Count { field, value })
	}

	/// Skips a length read from the stream. Negative lengths skip nothing.
	fn skip_len<R>(buf: &mut R, field: &'static str, value: i32, per_item: u64) -> Result<(), XacImportError>
	where
		R: Read,
	{
		match u64::try_from(value) {
			Ok(len) => buf.skip(len * per_item)?,
			Err(_) => warn!("Ignoring negative {}: {}", field, value),
		}

		Ok(())
	}

	/// Validates the magic and skips the remaining file header
	pub fn header<R>(buf: &mut R) -> Result<(), XacImportError>
	where
		R: Read,
	{
		let magic = buf.read_fixed_str(MAGIC.len())?;
		if magic != MAGIC {
			return Err(XacImportError::Magic(magic));
		}

		buf.skip(HEADER_INFO_LEN)?;
		Ok(())
	}

	/// Decodes the body of a mesh chunk.
	///
	/// Only the first position, normal and UV layer is used; later layers of an
	/// already captured kind are skipped like unknown ones. Missing layers are
	/// zero-filled.
	pub fn mesh<R>(buf: &mut R, flags: ImportFlag) -> Result<MeshChunk, XacImportError>
	where
		R: Read,
	{
		buf.skip(8)?;
		let num_verts = buf.read_i32::<LE>()?;
		let num_faces = buf.read_i32::<LE>()?;
		buf.skip(16)?;
		let num_blocks = buf.read_i32::<LE>()?;
		buf.skip(4)?;

		let verts = count("vertex count", num_verts)?;
		let faces = count("face count", num_faces)?;

		// original vertex numbers, unused
		buf.skip(verts * 4)?;

		let mut captured = Captured::empty();
		let mut mesh = Mesh::default();

		for _ in 0..num_blocks {
			let block = AttrBlock::read(buf)?;

			match VertexAttr::from_i32(block.id) {
				Some(VertexAttr::Position) if !captured.contains(Captured::POSITION) => {
					mesh.positions = (0..verts).map(|_| buf.read_vec3_le()).collect::<io::Result<_>>()?;
					captured.insert(Captured::POSITION);
				},
				Some(VertexAttr::Normal) if !captured.contains(Captured::NORMAL) => {
					mesh.normals = (0..verts).map(|_| buf.read_vec3_le()).collect::<io::Result<_>>()?;
					captured.insert(Captured::NORMAL);
				},
				Some(VertexAttr::UvCoord) if !captured.contains(Captured::UV) => {
					mesh.uvs = (0..verts).map(|_| buf.read_vec2_le()).collect::<io::Result<_>>()?;
					captured.insert(Captured::UV);
				},
				_ => {
					debug!(id = block.id, size = block.size, "skipping vertex attribute layer");
					skip_len(buf, "attribute size", block.size, verts)?;
				},
			}
		}

		let faces_check = buf.read_i32::<LE>()?;
		let verts_check = buf.read_i32::<LE>()?;
		buf.skip(8)?;

		if faces_check != num_faces || verts_check != num_verts {
			if flags.contains(ImportFlag::RESYNC_ON_CHECK_FAILURE) {
				buf.skip(faces * 4)?;
			}

			return Ok(MeshChunk::Rejected(CountMismatch {
				faces: num_faces,
				faces_check: faces_check,
				vertices: num_verts,
				vertices_check: verts_check,
			}));
		}

		mesh.indices = (0..faces).map(|_| buf.read_i32::<LE>()).collect::<io::Result<_>>()?;

		let verts = verts as usize;
		mesh.positions.resize(verts, Vec3::zero());
		mesh.normals.resize(verts, Vec3::zero());
		mesh.uvs.resize(verts, Vec2::zero());

		Ok(MeshChunk::Decoded(mesh))
	}

	/// Walks every chunk of an actor, handing each decoded mesh to `export`
	/// along with its 0-based object index.
	///
	/// Reading stops once the announced mesh count has been exported, or at a
	/// clean end of stream between two chunks.
	pub fn read<R, F>(buf: &mut R, cfg: &ImportCfg, mut export: F) -> Result<Summary, XacImportError>
	where
		R: Read,
		F: FnMut(usize, &Mesh) -> io::Result<()>,
	{
		header(buf)?;

		let mut summary = Summary::default();

		while let Some(chunk) = ChunkHeader::read(buf)? {
			debug!(id = chunk.id, length = chunk.length, version = chunk.version, "chunk");

			match ChunkId::from_i32(chunk.id) {
				Some(ChunkId::MaterialTotals) => {
					buf.skip(8)?;
					summary.declared_objects = buf.read_i32::<LE>()?;
				},
				Some(ChunkId::Mesh) => match mesh(buf, cfg.flags)? {
					MeshChunk::Decoded(mesh) => {
						let index = summary.exported;
						export(index, &mesh).map_err(|source| XacImportError::Export { index, source })?;
						summary.exported += 1;

						if summary.is_complete() {
							break;
						}
					},
					MeshChunk::Rejected(mismatch) => {
						warn!("{}", mismatch);
						summary.rejected += 1;
					},
				},
				// Material chunks are not parsed, textures are not extracted
				Some(_) => skip_len(buf, "chunk length", chunk.length, 1)?,
				None => {
					warn!("Unknown identifier: {}", chunk);
					summary.unknown_chunks += 1;
					skip_len(buf, "chunk length", chunk.length, 1)?;
				},
			}
		}

		Ok(summary)
	}
}
