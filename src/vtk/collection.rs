//! ParaView collection manifest (`.pvd`) emission.

use std::io::{self, Write};

use crate::series::FrameRecord;

use super::xml::XmlWriter;

/// Serialize frame records as a `.pvd` collection document.
///
/// Rows appear in capture order; time scrubbers consume them as-is.
pub fn write_pvd(frames: &[FrameRecord], out: &mut dyn Write) -> io::Result<()> {
    let mut xml = XmlWriter::new(out);
    xml.declaration()?;
    xml.open(
        "VTKFile",
        &[
            ("type", "Collection"),
            ("version", "0.1"),
            ("byte_order", "LittleEndian"),
        ],
    )?;
    xml.open("Collection", &[])?;
    for frame in frames {
        xml.empty(
            "DataSet",
            &[
                ("timestep", &frame.time.to_string()),
                ("group", ""),
                ("part", "0"),
                ("file", &frame.file),
            ],
        )?;
    }
    xml.close()?;
    xml.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pvd_lists_frames_in_order() {
        let frames = vec![
            FrameRecord::new(0.0, "run_0000.vtp"),
            FrameRecord::new(0.1, "run_0001.vtp"),
            FrameRecord::new(0.2, "run_0002.vtp"),
        ];
        let mut buf = Vec::new();
        write_pvd(&frames, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("type=\"Collection\""));
        let a = text.find("run_0000.vtp").unwrap();
        let b = text.find("run_0001.vtp").unwrap();
        let c = text.find("run_0002.vtp").unwrap();
        assert!(a < b && b < c);
        assert!(text.contains("timestep=\"0.1\""));
    }

    #[test]
    fn test_empty_pvd_still_valid() {
        let mut buf = Vec::new();
        write_pvd(&[], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("<Collection>"));
        assert!(text.contains("</Collection>"));
    }
}
