use std::io::{
	self,
	Error,
	ErrorKind,
	Read,
	Result
};

use ultraviolet::vec::{
	Vec2,
	Vec3
};

pub trait ReadBinExt: Read {
	/// Reads exactly `length` bytes as text. Padding is kept as part of the string.
	#[inline]
	fn read_fixed_str(&mut self, length: usize) -> Result<String> {
		let mut raw = vec![0; length];
		self.read_exact(&mut raw)?;

		Ok(String::from_utf8_lossy(&raw).into_owned())
	}

	/// Advances past `length` bytes without keeping them
	#[inline]
	fn skip(&mut self, length: u64) -> Result<()> {
		let skipped = io::copy(&mut Read::take(&mut *self, length), &mut io::sink())?;

		if skipped < length {
			return Err(Error::new(ErrorKind::UnexpectedEof,
				format!("tried to skip {} bytes, only {} left", length, skipped)));
		}

		Ok(())
	}

	/// Fills `buf` completely, unless the stream is already exhausted.
	/// Returns `false` when not a single byte was available, and fails on a partial fill.
	fn read_exact_or_none(&mut self, buf: &mut [u8]) -> Result<bool> {
		let mut filled = 0;

		while filled < buf.len() {
			match self.read(&mut buf[filled..]) {
				Ok(0) => break,
				Ok(n) => filled += n,
				Err(e) if e.kind() == ErrorKind::Interrupted => {},
				Err(e) => return Err(e),
			}
		}

		if filled == buf.len() {
			Ok(true)
		} else if filled == 0 {
			Ok(false)
		} else {
			Err(Error::new(ErrorKind::UnexpectedEof,
				format!("stream ended after {} of {} bytes", filled, buf.len())))
		}
	}

	/// Reads a little endian 2D vector
	#[inline]
	fn read_vec2_le(&mut self) -> Result<Vec2> {
		let mut x = [0; 4];
		let mut y = x;

		self.read_exact(&mut x)?;
		self.read_exact(&mut y)?;

		Ok(Vec2::new(f32::from_le_bytes(x), f32::from_le_bytes(y)))
	}

	/// Reads a little endian 3D vector
	#[inline]
	fn read_vec3_le(&mut self) -> Result<Vec3> {
		let mut x = [0; 4];
		let mut y = x;
		let mut z = y;

		self.read_exact(&mut x)?;
		self.read_exact(&mut y)?;
		self.read_exact(&mut z)?;

		Ok(Vec3::new(f32::from_le_bytes(x), f32::from_le_bytes(y), f32::from_le_bytes(z)))
	}
}

impl<R> ReadBinExt for R
where
	R: Read + ?Sized,
{
}
