//! Output document header (DSC comments)

use crate::document::Document;
use crate::layout::LayoutPlan;
use crate::options::RunConfig;
use crate::scan::HeaderScan;
use std::io::{self, Write};

/// Write the structuring comments that open the output document
pub fn write_header<W: Write + ?Sized>(
    out: &mut W,
    document: &Document,
    config: &RunConfig,
    header: &HeaderScan,
    plan: &LayoutPlan,
) -> io::Result<()> {
    writeln!(out, "%!PS-Adobe-3.0")?;
    writeln!(out, "%%Creator: {}", config.creator)?;

    for line in &header.forwarded {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }

    let media_w = config.media.width() as i64;
    let media_h = config.media.height() as i64;

    writeln!(out, "%%Pages: {}", plan.tile_count())?;
    if config.orientation_comment {
        writeln!(out, "%%Orientation: {}", plan.sheet_orientation().label())?;
    }
    writeln!(
        out,
        "%%DocumentMedia: {} {} {} 0 white ()",
        config.media_name, media_w, media_h
    )?;
    writeln!(out, "%%BoundingBox: 0 0 {} {}", media_w, media_h)?;
    writeln!(out, "%%EndComments")?;
    writeln!(out)?;

    writeln!(
        out,
        "% Print poster {} in {}x{} tiles with {} magnification",
        document.name,
        plan.rows,
        plan.columns,
        format_general(plan.scale, 3)
    )
}

/// Format like C's `%.{precision}g`: significant digits, trailing zeros
/// dropped, exponent form for very large or small values.
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let precision = precision.max(1);

    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
