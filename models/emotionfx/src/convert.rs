//! Whole-file conversion of actors into one OBJ file per mesh.

use std::{
	ffi::OsString,
	fs::File,
	io::BufReader,
	path::{
		Path,
		PathBuf
	}
};

use tracing::info;

use xac2obj_models_wavefront::obj::export;

use crate::xac::{
	import::{
		read,
		XacImportError
	},
	ImportCfg,
	Summary
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertCfg {
	pub import: ImportCfg,
	/// Receives the OBJ files instead of the input's directory
	pub output_dir: Option<PathBuf>,
}

/// Returns `<input>.<index>.obj`, moved into `output_dir` if given
pub fn output_path(input: &Path, index: usize, output_dir: Option<&Path>) -> PathBuf {
	let mut name: OsString = match output_dir {
		Some(dir) => dir.join(input.file_name().unwrap_or(input.as_os_str())).into_os_string(),
		None => input.as_os_str().to_owned(),
	};
	name.push(format!(".{}.obj", index));

	PathBuf::from(name)
}

/// Converts the actor at `input`, writing every mesh passing validation as soon
/// as it is decoded. Files written before a fatal error are kept.
pub fn convert<P>(input: P, cfg: &ConvertCfg) -> Result<Summary, XacImportError>
where
	P: AsRef<Path>,
{
	let input = input.as_ref();
	let mut buf = BufReader::new(File::open(input)?);

	read(&mut buf, &cfg.import, |index, mesh| {
		let path = output_path(input, index, cfg.output_dir.as_deref());
		export::save(mesh, &path)?;

		info!("Wrote {} ({} vertices, {} triangles)", path.display(), mesh.vertex_count(),
			mesh.triangle_count());
		Ok(())
	})
}
