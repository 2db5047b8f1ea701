//! Compact binary model format.
//!
//! All fields are little-endian:
//!
//! ```text
//! magic        u32   "CMLM" (0x4D4C4D43)
//! layer_count  i32
//! per layer:
//!   activation i32   0 = None, 1 = Sigmoid, 2 = LeakyReLU
//!   count      i32
//!   data       count x f32
//!   bias       count x f32
//!   weights    count x prev_count x f32   (absent for the head)
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::activation::activation::Activation;
use crate::error::{ModelError, Result};
use crate::memory::budget::MemoryBudget;
use crate::network::network::Network;

pub const MODEL_MAGIC: u32 = 0x4D4C_4D43;

impl Network {
    /// Writes the whole chain to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::debug!("saved {} layers to {}", self.len(), path.display());
        Ok(())
    }

    /// Encodes the chain into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&MODEL_MAGIC.to_le_bytes())?;
        write_i32(writer, self.len())?;

        for layer in self.iter() {
            writer.write_all(&layer.activation().ordinal().to_le_bytes())?;
            write_i32(writer, layer.count())?;
            write_floats(writer, layer.data())?;
            write_floats(writer, layer.bias())?;
            write_floats(writer, layer.weights())?;
        }
        Ok(())
    }

    /// Reads a model file into a fresh network.
    ///
    /// On failure every layer built so far is torn down, so `budget` is left
    /// where it was before the call.
    pub fn load<P: AsRef<Path>>(budget: &mut MemoryBudget, path: P) -> Result<Network> {
        let mut network = Network::new();
        match network.load_into(budget, path) {
            Ok(()) => Ok(network),
            Err(e) => {
                network.teardown(budget);
                Err(e)
            }
        }
    }

    /// Reads a model file into this (empty) network.
    ///
    /// A failure after some layers were appended leaves them in place: the
    /// network is consistent layer by layer but incomplete, and still holds
    /// budget. Discard it with `teardown`.
    pub fn load_into<P: AsRef<Path>>(&mut self, budget: &mut MemoryBudget, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let result = self.read_from(budget, &mut reader);
        match &result {
            Ok(()) => log::debug!("loaded {} layers from {}", self.len(), path.display()),
            Err(e) => log::warn!("rejected model {}: {e}", path.display()),
        }
        result
    }

    /// Decodes a model from `reader`, appending its layers to this (empty)
    /// network. Same no-rollback behaviour as `load_into`.
    pub fn read_from<R: Read>(&mut self, budget: &mut MemoryBudget, reader: &mut R) -> Result<()> {
        if !self.is_empty() {
            return Err(ModelError::NotEmpty { layers: self.len() });
        }

        let magic = u32::from_le_bytes(read_word(reader)?);
        if magic != MODEL_MAGIC {
            return Err(ModelError::BadMagic { found: magic });
        }

        let layer_count = i32::from_le_bytes(read_word(reader)?);
        if layer_count < 0 {
            return Err(ModelError::InvalidLayerCount(layer_count));
        }

        for _ in 0..layer_count {
            let ordinal = i32::from_le_bytes(read_word(reader)?);
            let activation = Activation::from_ordinal(ordinal)
                .ok_or(ModelError::UnknownActivation(ordinal))?;
            let count = i32::from_le_bytes(read_word(reader)?);
            if count <= 0 {
                return Err(ModelError::InvalidUnitCount(count));
            }

            let layer = self.append_layer(budget, count as usize, activation);
            read_floats(reader, layer.data_mut())?;
            read_floats(reader, layer.bias_mut())?;
            read_floats(reader, layer.weights_mut())?;
        }
        Ok(())
    }
}

fn write_i32<W: Write>(writer: &mut W, value: usize) -> Result<()> {
    let value = i32::try_from(value).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "value does not fit in i32")
    })?;
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_floats<W: Write>(writer: &mut W, values: &[f32]) -> Result<()> {
    for v in values {
        writer.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

fn read_word<R: Read>(reader: &mut R) -> Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_floats<R: Read>(reader: &mut R, out: &mut [f32]) -> Result<()> {
    for v in out.iter_mut() {
        *v = f32::from_le_bytes(read_word(reader)?);
    }
    Ok(())
}
