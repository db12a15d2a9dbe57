//! Shared fixtures: on-disk DDS byte builders.
#![allow(dead_code)] // not every test binary uses every builder

use nifopt::services::dds::{DDS_MAGIC, DDSPF_DX10, DdsPixelFormat};

fn push_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&value.to_le_bytes());
}

fn push_pixel_format(buffer: &mut Vec<u8>, pf: &DdsPixelFormat) {
    push_u32(buffer, pf.size);
    push_u32(buffer, pf.flags);
    push_u32(buffer, pf.four_cc);
    push_u32(buffer, pf.rgb_bit_count);
    push_u32(buffer, pf.r_bit_mask);
    push_u32(buffer, pf.g_bit_mask);
    push_u32(buffer, pf.b_bit_mask);
    push_u32(buffer, pf.a_bit_mask);
}

/// A DDS file image: magic plus primary header (no texture payload; the
/// scanner never reads past the headers).
pub fn dds_bytes(width: u32, height: u32, pf: &DdsPixelFormat, caps2: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(&DDS_MAGIC);
    push_u32(&mut buffer, 124);
    push_u32(&mut buffer, 0x1007); // caps | height | width | pixelformat
    push_u32(&mut buffer, height);
    push_u32(&mut buffer, width);
    push_u32(&mut buffer, 0); // pitch
    push_u32(&mut buffer, 0); // depth
    push_u32(&mut buffer, 0); // mipmaps
    for _ in 0..11 {
        push_u32(&mut buffer, 0);
    }
    push_pixel_format(&mut buffer, pf);
    push_u32(&mut buffer, 0x1000); // caps
    push_u32(&mut buffer, caps2);
    push_u32(&mut buffer, 0);
    push_u32(&mut buffer, 0);
    push_u32(&mut buffer, 0);
    buffer
}

/// A DDS file image with a DX10 extended header.
pub fn dx10_bytes(width: u32, height: u32, dxgi_format: u32) -> Vec<u8> {
    let mut buffer = dds_bytes(width, height, &DDSPF_DX10, 0);
    push_u32(&mut buffer, dxgi_format);
    push_u32(&mut buffer, 3); // 2D resource
    push_u32(&mut buffer, 0);
    push_u32(&mut buffer, 1);
    push_u32(&mut buffer, 0);
    buffer
}
