//! DDS container header decoding.
//!
//! Decodes the magic tag, the fixed-size primary header, and the optional
//! DX10 extended header from any byte stream. Decoding is structural only;
//! semantic validation lives in [`crate::services::scan`].
//!
//! Pixel formats are matched by field-by-field equality against the named
//! constant records below, never by raw memory comparison, so the decode is
//! independent of host byte order and struct layout.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Magic tag opening every DDS file.
pub const DDS_MAGIC: [u8; 4] = *b"DDS ";

// Pixel format flag bits.
pub const DDPF_ALPHAPIXELS: u32 = 0x1;
pub const DDPF_FOURCC: u32 = 0x4;
pub const DDPF_RGB: u32 = 0x40;
pub const DDPF_LUMINANCE: u32 = 0x20000;

/// Cubemap bit in `caps2`.
pub const DDSCAPS2_CUBEMAP: u32 = 0x200;

pub const FOURCC_DX10: u32 = u32::from_le_bytes(*b"DX10");

// DXGI format enumerants carried by the DX10 extended header (the subset
// the compliance rules care about).
pub const DXGI_FORMAT_R8G8B8A8_UNORM_SRGB: u32 = 29;
pub const DXGI_FORMAT_BC1_UNORM_SRGB: u32 = 72;
pub const DXGI_FORMAT_BC2_UNORM_SRGB: u32 = 75;
pub const DXGI_FORMAT_BC3_UNORM_SRGB: u32 = 78;
pub const DXGI_FORMAT_B5G6R5_UNORM: u32 = 85;
pub const DXGI_FORMAT_B5G5R5A1_UNORM: u32 = 86;
pub const DXGI_FORMAT_BC7_UNORM_SRGB: u32 = 99;
pub const DXGI_FORMAT_B4G4R4A4_UNORM: u32 = 115;

/// The 32-byte pixel format descriptor inside the primary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsPixelFormat {
    pub size: u32,
    pub flags: u32,
    pub four_cc: u32,
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    const fn new(flags: u32, four_cc: u32, bits: u32, r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            size: 32,
            flags,
            four_cc,
            rgb_bit_count: bits,
            r_bit_mask: r,
            g_bit_mask: g,
            b_bit_mask: b,
            a_bit_mask: a,
        }
    }
}

/// Uncompressed 24-bit RGB.
pub const DDSPF_R8G8B8: DdsPixelFormat =
    DdsPixelFormat::new(DDPF_RGB, 0, 24, 0x00ff0000, 0x0000ff00, 0x000000ff, 0);

/// 8-bit luminance.
pub const DDSPF_L8: DdsPixelFormat = DdsPixelFormat::new(DDPF_LUMINANCE, 0, 8, 0xff, 0, 0, 0);

/// 16-bit luminance.
pub const DDSPF_L16: DdsPixelFormat = DdsPixelFormat::new(DDPF_LUMINANCE, 0, 16, 0xffff, 0, 0, 0);

/// 8-bit luminance with 8-bit alpha.
pub const DDSPF_A8L8: DdsPixelFormat =
    DdsPixelFormat::new(DDPF_LUMINANCE | DDPF_ALPHAPIXELS, 0, 16, 0x00ff, 0, 0, 0xff00);

/// Sentinel signaling that a DX10 extended header follows.
pub const DDSPF_DX10: DdsPixelFormat = DdsPixelFormat::new(DDPF_FOURCC, FOURCC_DX10, 0, 0, 0, 0, 0);

/// Legacy packed 5-6-5.
pub const DDSPF_R5G6B5: DdsPixelFormat =
    DdsPixelFormat::new(DDPF_RGB, 0, 16, 0xf800, 0x07e0, 0x001f, 0);

/// Legacy packed 5-5-5-1.
pub const DDSPF_A1R5G5B5: DdsPixelFormat =
    DdsPixelFormat::new(DDPF_RGB | DDPF_ALPHAPIXELS, 0, 16, 0x7c00, 0x03e0, 0x001f, 0x8000);

/// Legacy packed 4-4-4-4.
pub const DDSPF_A4R4G4B4: DdsPixelFormat =
    DdsPixelFormat::new(DDPF_RGB | DDPF_ALPHAPIXELS, 0, 16, 0x0f00, 0x00f0, 0x000f, 0xf000);

/// The fixed-size primary header following the magic tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsHeader {
    pub size: u32,
    pub flags: u32,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mipmap_count: u32,
    pub reserved1: [u32; 11],
    pub pixel_format: DdsPixelFormat,
    pub caps: u32,
    pub caps2: u32,
    pub caps3: u32,
    pub caps4: u32,
    pub reserved2: u32,
}

impl DdsHeader {
    pub fn is_cubemap(&self) -> bool {
        self.caps2 & DDSCAPS2_CUBEMAP != 0
    }

    /// True when the pixel format defers to a DX10 extended header.
    pub fn signals_dx10(&self) -> bool {
        self.pixel_format == DDSPF_DX10
    }
}

/// The optional DX10 extended header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dx10Header {
    pub dxgi_format: u32,
    pub resource_dimension: u32,
    pub misc_flag: u32,
    pub array_size: u32,
    pub misc_flags2: u32,
}

impl Dx10Header {
    /// sRGB block-compressed or sRGB RGBA8 variants.
    pub fn is_srgb(&self) -> bool {
        matches!(
            self.dxgi_format,
            DXGI_FORMAT_BC1_UNORM_SRGB
                | DXGI_FORMAT_BC2_UNORM_SRGB
                | DXGI_FORMAT_BC3_UNORM_SRGB
                | DXGI_FORMAT_BC7_UNORM_SRGB
                | DXGI_FORMAT_R8G8B8A8_UNORM_SRGB
        )
    }

    /// Legacy 16-bit packed formats (5-6-5, 5-5-5-1, 4-4-4-4).
    pub fn is_packed_16bit(&self) -> bool {
        matches!(
            self.dxgi_format,
            DXGI_FORMAT_B5G6R5_UNORM | DXGI_FORMAT_B5G5R5A1_UNORM | DXGI_FORMAT_B4G4R4A4_UNORM
        )
    }
}

/// A fully decoded DDS header set.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDds {
    pub header: DdsHeader,
    /// Present when the pixel format signals DX10 and the extended header
    /// read in full; `None` with the DX10 sentinel set means the extension
    /// was announced but missing or cut short.
    pub extended: Option<Dx10Header>,
}

/// Outcome of probing a stream for a DDS header.
#[derive(Debug, Clone, PartialEq)]
pub enum DdsProbe {
    /// The magic tag did not match; the stream holds some other format.
    NotDds,
    /// The magic matched but the primary header ended early.
    Truncated,
    Parsed(ParsedDds),
}

/// Decode the headers at the front of `reader`.
///
/// Consumes the magic, the primary header, and (when signaled) the extended
/// header. Only genuine I/O failures surface as errors; short streams map to
/// [`DdsProbe::NotDds`] / [`DdsProbe::Truncated`].
pub fn probe<R: Read>(reader: &mut R) -> io::Result<DdsProbe> {
    let mut magic = [0u8; 4];
    match reader.read_exact(&mut magic) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(DdsProbe::NotDds),
        Err(e) => return Err(e),
    }
    if magic != DDS_MAGIC {
        return Ok(DdsProbe::NotDds);
    }

    let header = match read_header(reader) {
        Ok(header) => header,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(DdsProbe::Truncated),
        Err(e) => return Err(e),
    };

    let extended = if header.signals_dx10() {
        match read_dx10_header(reader) {
            Ok(extended) => Some(extended),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => None,
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    Ok(DdsProbe::Parsed(ParsedDds { header, extended }))
}

fn read_pixel_format<R: Read>(reader: &mut R) -> io::Result<DdsPixelFormat> {
    Ok(DdsPixelFormat {
        size: reader.read_u32::<LittleEndian>()?,
        flags: reader.read_u32::<LittleEndian>()?,
        four_cc: reader.read_u32::<LittleEndian>()?,
        rgb_bit_count: reader.read_u32::<LittleEndian>()?,
        r_bit_mask: reader.read_u32::<LittleEndian>()?,
        g_bit_mask: reader.read_u32::<LittleEndian>()?,
        b_bit_mask: reader.read_u32::<LittleEndian>()?,
        a_bit_mask: reader.read_u32::<LittleEndian>()?,
    })
}

fn read_header<R: Read>(reader: &mut R) -> io::Result<DdsHeader> {
    let size = reader.read_u32::<LittleEndian>()?;
    let flags = reader.read_u32::<LittleEndian>()?;
    let height = reader.read_u32::<LittleEndian>()?;
    let width = reader.read_u32::<LittleEndian>()?;
    let pitch_or_linear_size = reader.read_u32::<LittleEndian>()?;
    let depth = reader.read_u32::<LittleEndian>()?;
    let mipmap_count = reader.read_u32::<LittleEndian>()?;
    let mut reserved1 = [0u32; 11];
    for slot in &mut reserved1 {
        *slot = reader.read_u32::<LittleEndian>()?;
    }
    let pixel_format = read_pixel_format(reader)?;
    Ok(DdsHeader {
        size,
        flags,
        height,
        width,
        pitch_or_linear_size,
        depth,
        mipmap_count,
        reserved1,
        pixel_format,
        caps: reader.read_u32::<LittleEndian>()?,
        caps2: reader.read_u32::<LittleEndian>()?,
        caps3: reader.read_u32::<LittleEndian>()?,
        caps4: reader.read_u32::<LittleEndian>()?,
        reserved2: reader.read_u32::<LittleEndian>()?,
    })
}

fn read_dx10_header<R: Read>(reader: &mut R) -> io::Result<Dx10Header> {
    Ok(Dx10Header {
        dxgi_format: reader.read_u32::<LittleEndian>()?,
        resource_dimension: reader.read_u32::<LittleEndian>()?,
        misc_flag: reader.read_u32::<LittleEndian>()?,
        array_size: reader.read_u32::<LittleEndian>()?,
        misc_flags2: reader.read_u32::<LittleEndian>()?,
    })
}
