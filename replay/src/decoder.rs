use std::borrow::Cow;
use std::path::PathBuf;

use spring_logging::Log;
use spring_start_script::{GameSpecificationDecoder, StartScriptDecoder};

use crate::config::{ReplayConfig, ScriptEncoding};
use crate::cursor::ByteCursor;
use crate::errors::{ReplayError, Result};
use crate::header::{HeaderVariant, MAGIC_NUMBER, RawHeader, until_nul};
use crate::types::ReplayHeader;
use crate::Replay;

/// Turns the bytes of a replay file into a [`Replay`].
///
/// The start script is handed to a [`GameSpecificationDecoder`], which can be
/// swapped via [`ReplayDecoder::builder`] for tests or alternative script
/// formats.
#[derive(Debug)]
pub struct ReplayDecoder {
    spec_decoder: Box<dyn GameSpecificationDecoder + Send + Sync>,
    script_encoding: ScriptEncoding,
}

impl Default for ReplayDecoder {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ReplayDecoder {
    pub fn builder() -> ReplayDecoderBuilder {
        ReplayDecoderBuilder::default()
    }

    /// Decodes the header and start script. `file_path` is not read; it is
    /// carried onto the result for the caller's bookkeeping.
    pub fn decode(&self, data: &[u8], file_path: impl Into<PathBuf>) -> Result<Replay> {
        self.decode_as(data, file_path.into(), self.script_encoding)
    }

    pub(crate) fn decode_as(&self, data: &[u8], file_path: PathBuf, script_encoding: ScriptEncoding) -> Result<Replay> {
        let mut cursor = ByteCursor::new(data);
        let raw_header = decode_header(&mut cursor)?;

        let script_len = usize::try_from(raw_header.script_size).map_err(|_| ReplayError::InvalidBlockSize {
            field: "script",
            size: raw_header.script_size,
        })?;
        let script_block = cursor.read_bytes(script_len)?;
        let script = script_text(script_block, script_encoding)?;

        tracing::trace!(
            target: Log::Replay,
            script_len,
            text_len = script.len(),
            "Forwarding start script"
        );

        let game_specification = self.spec_decoder.decode(&script)?;
        let header = ReplayHeader::from_raw(&raw_header)?;

        Ok(Replay {
            header,
            raw_header,
            file_path,
            game_specification,
        })
    }
}

/// Checks the magic number, reads the version tag and decodes the matching
/// header. On success the cursor sits on the first byte of the start script.
pub fn decode_header(cursor: &mut ByteCursor<'_>) -> Result<RawHeader> {
    if !cursor.expect_all(MAGIC_NUMBER)? {
        return Err(ReplayError::MissingMagicNumber);
    }

    let version = cursor.read::<i32>()?;
    let variant = HeaderVariant::from_version(version)?;

    tracing::debug!(target: Log::Replay, version, ?variant, "Selected header schema");

    let header = variant.decode(cursor)?;

    tracing::debug!(
        target: Log::Replay,
        header_size = header.header_size,
        script_size = header.script_size,
        demo_stream_size = header.demo_stream_size,
        "Decoded replay header"
    );

    Ok(header)
}

/// The script block is stored as a C string: anything after the first NUL is
/// padding.
fn script_text(block: &[u8], encoding: ScriptEncoding) -> Result<Cow<'_, str>> {
    let text = until_nul(block);

    match encoding {
        ScriptEncoding::Lossy => Ok(String::from_utf8_lossy(text)),
        ScriptEncoding::Strict => Ok(Cow::Borrowed(std::str::from_utf8(text)?)),
    }
}

#[derive(Debug, Default)]
pub struct ReplayDecoderBuilder {
    spec_decoder: Option<Box<dyn GameSpecificationDecoder + Send + Sync>>,
    script_encoding: ScriptEncoding,
}

impl ReplayDecoderBuilder {
    pub fn with_spec_decoder(mut self, decoder: impl GameSpecificationDecoder + Send + Sync + 'static) -> Self {
        self.spec_decoder = Some(Box::new(decoder));
        self
    }

    pub fn with_script_encoding(mut self, script_encoding: ScriptEncoding) -> Self {
        self.script_encoding = script_encoding;
        self
    }

    pub fn with_config(self, config: &ReplayConfig) -> Self {
        self.with_script_encoding(config.script_encoding)
    }

    pub fn build(self) -> ReplayDecoder {
        ReplayDecoder {
            spec_decoder: self.spec_decoder.unwrap_or_else(|| Box::new(StartScriptDecoder)),
            script_encoding: self.script_encoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_text_stops_at_first_nul() {
        let text = script_text(b"[GAME]{}\0\0\0junk", ScriptEncoding::Strict).unwrap();
        assert_eq!(text, "[GAME]{}");

        let text = script_text(b"[GAME]{}", ScriptEncoding::Strict).unwrap();
        assert_eq!(text, "[GAME]{}");
    }

    #[test]
    fn test_script_encoding_modes() {
        let block = b"[GAME]{name=\xFFx;}\0";

        let text = script_text(block, ScriptEncoding::Lossy).unwrap();
        assert_eq!(text, "[GAME]{name=\u{FFFD}x;}");

        assert!(matches!(
            script_text(block, ScriptEncoding::Strict),
            Err(ReplayError::ScriptEncoding(_))
        ));
    }

    #[test]
    fn test_header_requires_magic_number() {
        let mut data = b"spring demofilE\0".to_vec();
        data.extend_from_slice(&5i32.to_le_bytes());

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(decode_header(&mut cursor).unwrap_err(), ReplayError::MissingMagicNumber);
    }
}
