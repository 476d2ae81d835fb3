use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use png::Encoder;
use png::chunk::ChunkType;

use tilecast_render::Rendering;

/// Writes `image` to a new PNG file at `path`, replacing any existing file.
pub fn write_png(path: &Path, image: &Rendering) -> Result<(), std::io::Error> {
    let mut buf_writer = BufWriter::new(File::create(path)?);
    encode_png(&mut buf_writer, image)?;
    let file = buf_writer.into_inner().map_err(std::io::IntoInnerError::into_error)?;
    file.sync_all()?;
    Ok(())
}

/// Encodes `image` as 8-bit RGBA PNG data with sRGB color space metadata.
pub fn encode_png<W: Write>(writer: W, image: &Rendering) -> Result<(), std::io::Error> {
    let mut png_encoder = Encoder::new(writer, image.size.width, image.size.height);
    png_encoder.set_color(png::ColorType::Rgba);
    png_encoder.set_depth(png::BitDepth::Eight);
    png_encoder.set_compression(png::Compression::Best);
    let mut png_writer = png_encoder.write_header()?;
    write_color_metadata(&mut png_writer)?;
    png_writer.write_image_data(bytemuck::cast_slice::<[u8; 4], u8>(&image.data))?;
    png_writer.finish()?;
    Ok(())
}

fn write_color_metadata<W: Write>(png_writer: &mut png::Writer<W>) -> Result<(), std::io::Error> {
    // Chunk contents from http://www.libpng.org/pub/png/spec/1.2/PNG-Chunks.html#C.sRGB

    // Perceptual rendering intent.
    png_writer.write_chunk(ChunkType(*b"sRGB"), &[0])?;
    // Gamma for decoders which do not understand sRGB.
    png_writer.write_chunk(ChunkType(*b"gAMA"), &45455_u32.to_be_bytes())?;
    // Chromaticities of the sRGB primaries and white point, likewise.
    png_writer.write_chunk(
        ChunkType(*b"cHRM"),
        &[
            31270, // White Point x
            32900, // White Point y
            64000, // Red x
            33000, // Red y
            30000, // Green x
            60000, // Green y
            15000, // Blue x
            6000,  // Blue y
        ]
        .into_iter()
        .flat_map(u32::to_be_bytes)
        .collect::<Box<[u8]>>(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tilecast::math::ImageSize;

    #[test]
    fn round_trip_through_decoder() {
        let mut image = Rendering::filled(ImageSize::new(3, 2), [10, 20, 30, 255]).unwrap();
        image.data[4] = [200, 100, 0, 255];

        let mut bytes = Vec::new();
        encode_png(&mut bytes, &image).unwrap();
        for chunk in [b"sRGB", b"gAMA", b"cHRM"] {
            assert!(bytes.windows(4).any(|w| w == chunk), "{chunk:?} missing");
        }

        let decoder = png::Decoder::new(bytes.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (3, 2));
        let mut decoded = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut decoded).unwrap();
        assert_eq!(decoded, bytemuck::cast_slice::<[u8; 4], u8>(&image.data));
    }
}
