//! Texture compliance rules.
//!
//! Evaluates a decoded DDS header against a fixed rule sequence and returns
//! human-readable findings in rule order. TGA files skip the header rules
//! entirely and are gated by a name-based exception instead.

use crate::models::TargetGame;
use crate::services::dds::{
    self, DDSPF_A1R5G5B5, DDSPF_A4R4G4B4, DDSPF_A8L8, DDSPF_L8, DDSPF_L16, DDSPF_R5G6B5,
    DDSPF_R8G8B8, DdsProbe, ParsedDds,
};
use regex::Regex;
use std::io::{self, Read};

const WIN7_CRASH_WARNING: &str = "This format will cause the game to crash on Windows 7.";

/// Path marker for facegen exports, the one sanctioned TGA source.
const FACEGEN_MARKER: &str = "facegendata";

/// Evaluates the texture compliance rules.
///
/// Rules run in a fixed order and each appends at most one finding (the
/// extended-header branch can append two), so the returned list order is
/// stable for any given header.
pub struct TextureScanner {
    /// Matches names following the normal-map suffix convention.
    normal_map_suffix: Regex,
}

impl TextureScanner {
    pub fn new() -> Self {
        Self {
            normal_map_suffix: Regex::new(r"_n\.dds$").expect("Invalid normal map suffix regex"),
        }
    }

    /// Probe `reader` for DDS headers and evaluate the rules.
    ///
    /// `path_lower` is the lowercased file path, used for the name-based
    /// rules. Streams that are not DDS at all produce no findings.
    pub fn scan_stream<R: Read>(
        &self,
        reader: &mut R,
        path_lower: &str,
        target: TargetGame,
    ) -> io::Result<Vec<String>> {
        match dds::probe(reader)? {
            DdsProbe::NotDds => Ok(Vec::new()),
            DdsProbe::Truncated => Ok(vec!["File header isn't a valid DDS header.".to_string()]),
            DdsProbe::Parsed(parsed) => Ok(self.evaluate(&parsed, path_lower, target)),
        }
    }

    /// Run the fixed rule sequence over a decoded header set.
    pub fn evaluate(
        &self,
        parsed: &ParsedDds,
        path_lower: &str,
        target: TargetGame,
    ) -> Vec<String> {
        let mut findings = Vec::new();
        let header = &parsed.header;
        let pf = &header.pixel_format;

        if header.width % 4 != 0 || header.height % 4 != 0 {
            findings.push(format!(
                "Dimensions must be divisible by 4 (currently {}x{}).",
                header.width, header.height
            ));
        }

        if header.is_cubemap() && *pf == DDSPF_R8G8B8 {
            findings.push(
                "Uncompressed cubemaps require an alpha channel. Use ARGB8 instead of RGB8 \
                 or compress them with DXT1/BC1."
                    .to_string(),
            );
        }

        if *pf == DDSPF_L8 {
            findings.push(
                "Unsupported L8 format (one channel with luminance flag). Use R8 or BC4 instead."
                    .to_string(),
            );
        }

        if *pf == DDSPF_L16 {
            findings.push(
                "Unsupported L16 format (one channel with luminance flag). Use R8 or BC4 instead."
                    .to_string(),
            );
        }

        if *pf == DDSPF_A8L8 {
            findings.push(
                "Unsupported A8L8 format (two channels with luminance flag). Use BC7 instead."
                    .to_string(),
            );
        }

        if header.signals_dx10() {
            if target == TargetGame::Le {
                findings.push("DX10+ DDS formats are not supported.".to_string());
            }

            match &parsed.extended {
                Some(extended) => {
                    if extended.is_srgb() {
                        if self.normal_map_suffix.is_match(path_lower) {
                            findings.push(
                                "sRGB color space detected. Use linear color space for normal \
                                 maps or lighting will be incorrect."
                                    .to_string(),
                            );
                        } else {
                            findings.push(
                                "sRGB color space detected. Use linear color space instead if \
                                 this was unintentional."
                                    .to_string(),
                            );
                        }
                    }

                    if extended.is_packed_16bit() {
                        findings.push(WIN7_CRASH_WARNING.to_string());
                    }
                }
                None => {
                    findings.push(
                        "File is flagged as DX10 but isn't a valid DX10 DDS header.".to_string(),
                    );
                }
            }
        } else if *pf == DDSPF_R5G6B5 || *pf == DDSPF_A1R5G5B5 || *pf == DDSPF_A4R4G4B4 {
            findings.push(WIN7_CRASH_WARNING.to_string());
        }

        findings
    }

    /// The TGA exception: facegen exports pass silently, anything else is
    /// flagged as unsupported.
    pub fn evaluate_tga(&self, path_lower: &str) -> Vec<String> {
        if path_lower.contains(FACEGEN_MARKER) {
            Vec::new()
        } else {
            vec!["TGA texture files are not supported.".to_string()]
        }
    }
}

impl Default for TextureScanner {
    fn default() -> Self {
        Self::new()
    }
}
