//! Wavefront OBJ geometry.
//!
//! Only the subset needed for single-object meshes is written: positions,
//! normals, texture coordinates and triangles sharing one index per corner.

/// Decimal places for every coordinate. `{:.8}` always uses `.` as separator.
/// Non-finite values are written as Rust prints them (`inf`, `-inf`, `NaN`).
pub const PRECISION: usize = 8;

#[cfg(feature = "export")]
pub mod export {
	use std::{
		fs::File,
		io::{
			self,
			BufWriter,
			Write
		},
		path::Path
	};

	use xac2obj_core::scene::Mesh;

	use super::PRECISION;

	/// Writes `mesh` as OBJ text.
	///
	/// Sections come in the order `v`, `vn`, `vt`, `f`, each followed by a blank
	/// line. The V texture coordinate is flipped, and face indices become 1-based
	/// and are shared by position, texture coordinate and normal.
	pub fn write<W>(mesh: &Mesh, buf: &mut W) -> io::Result<()>
	where
		W: Write,
	{
		for p in mesh.positions.iter() {
			writeln!(buf, "v {:.*} {:.*} {:.*}", PRECISION, p.x, PRECISION, p.y, PRECISION, p.z)?;
		}
		writeln!(buf)?;

		for n in mesh.normals.iter() {
			writeln!(buf, "vn {:.*} {:.*} {:.*}", PRECISION, n.x, PRECISION, n.y, PRECISION, n.z)?;
		}
		writeln!(buf)?;

		for uv in mesh.uvs.iter() {
			writeln!(buf, "vt {:.*} {:.*}", PRECISION, uv.x, PRECISION, 1.0 - uv.y)?;
		}
		writeln!(buf)?;

		for [a, b, c] in mesh.triangles() {
			let (a, b, c) = (a.wrapping_add(1), b.wrapping_add(1), c.wrapping_add(1));
			writeln!(buf, "f {0}/{0}/{0} {1}/{1}/{1} {2}/{2}/{2}", a, b, c)?;
		}
		writeln!(buf)
	}

	/// Creates (or truncates) the file at `path` and writes `mesh` into it
	pub fn save<P>(mesh: &Mesh, path: P) -> io::Result<()>
	where
		P: AsRef<Path>,
	{
		let mut buf = BufWriter::new(File::create(path)?);
		write(mesh, &mut buf)?;
		buf.flush()
	}

	#[cfg(test)]
	mod tests {
		use ultraviolet::vec::{
			Vec2,
			Vec3
		};

		use xac2obj_core::scene::Mesh;

		fn to_string(mesh: &Mesh) -> String {
			let mut out = vec![];
			super::write(mesh, &mut out).unwrap();
			String::from_utf8(out).unwrap()
		}

		fn triangle() -> Mesh {
			Mesh {
				positions: vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0),
					Vec3::new(0.0, 1.0, -0.5)],
				normals: vec![Vec3::new(0.0, 0.0, 1.0); 3],
				uvs: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
				indices: vec![0, 1, 2],
			}
		}

		#[test]
		fn test_write() {
			let expected = "\
v 0.00000000 0.00000000 0.00000000
v 1.00000000 0.00000000 0.00000000
v 0.00000000 1.00000000 -0.50000000

vn 0.00000000 0.00000000 1.00000000
vn 0.00000000 0.00000000 1.00000000
vn 0.00000000 0.00000000 1.00000000

vt 0.00000000 1.00000000
vt 1.00000000 1.00000000
vt 0.00000000 0.00000000

f 1/1/1 2/2/2 3/3/3

";
			assert_eq!(expected, to_string(&triangle()));
		}

		#[test]
		fn test_uv_flip() {
			let mut mesh = Mesh::with_vertices(1);
			mesh.uvs[0] = Vec2::new(0.5, 0.25);

			assert!(to_string(&mesh).contains("vt 0.50000000 0.75000000\n"));
		}

		#[test]
		fn test_face_indices_shifted() {
			let mut mesh = Mesh::with_vertices(8);
			mesh.indices = vec![5, 6, 7];

			assert!(to_string(&mesh).contains("\nf 6/6/6 7/7/7 8/8/8\n"));
		}

		#[test]
		fn test_partial_triangle_dropped() {
			let mut mesh = Mesh::with_vertices(3);
			mesh.indices = vec![0, 1, 2, 0, 1];

			let text = to_string(&mesh);
			assert_eq!(1, text.lines().filter(|l| l.starts_with("f ")).count());
		}

		#[test]
		fn test_section_counts() {
			let mut mesh = Mesh::with_vertices(4);
			mesh.indices = vec![0, 1, 2, 2, 3, 0];

			let text = to_string(&mesh);
			let lines: Vec<&str> = text.lines().collect();
			assert_eq!(4 + 1 + 4 + 1 + 4 + 1 + 2 + 1, lines.len());
			assert!(lines[0..4].iter().all(|l| l.starts_with("v ")));
			assert_eq!("", lines[4]);
			assert!(lines[5..9].iter().all(|l| l.starts_with("vn ")));
			assert_eq!("", lines[9]);
			assert!(lines[10..14].iter().all(|l| l.starts_with("vt ")));
			assert_eq!("", lines[14]);
			assert!(lines[15..17].iter().all(|l| l.starts_with("f ")));
			assert_eq!("", lines[17]);
		}

		#[test]
		fn test_rounding() {
			let mut mesh = Mesh::with_vertices(1);
			mesh.positions[0] = Vec3::new(0.123456789, -2.5, 1234.0);

			assert!(to_string(&mesh).starts_with("v 0.12345679 -2.50000000 1234.00000000\n"));
		}

		#[test]
		fn test_non_finite() {
			let mut mesh = Mesh::with_vertices(1);
			mesh.positions[0] = Vec3::new(f32::INFINITY, f32::NEG_INFINITY, f32::NAN);

			assert!(to_string(&mesh).starts_with("v inf -inf NaN\n"));
		}

		#[test]
		fn test_empty() {
			assert_eq!("\n\n\n\n", to_string(&Mesh::default()));
		}
	}
}
