//! PostScript prolog and setup sections
//!
//! The prolog defines three procedures:
//! - `cutmark`: one cut line plus a filled alignment mark at a sheet corner
//! - `tileprolog` (`row col tileprolog`): clip to the sheet's drawable area
//!   and map input coordinates onto the tile's part of the poster
//! - `tileepilog`: draw the four corner marks and the `Grid ( row , col )`
//!   label, then emit the page
//!
//! The setup section asks the device for the media size and defines the
//! numbers those procedures read.

use crate::constants::{CLIP_MARGIN, CUT_LINE_WIDTH, LABEL_SIZE};
use crate::layout::LayoutPlan;
use crate::options::RunConfig;
use crate::types::BBox;

const TILE_PROCEDURES: &str = "\
% usage: \trow col tileprolog ps-code tilepilog
% these procedures output the tile specified by row & col
/tileprolog
{ \t%def
\tgsave
       leftmargin botmargin translate
\tdo_turn {exch} if
\t/colcount exch def
\t/rowcount exch def
\t% clip page contents
\tclipmargin neg dup moveto
\tpagewidth clipmargin 2 mul add 0 rlineto
\t0 pageheight clipmargin 2 mul add rlineto
\tpagewidth clipmargin 2 mul add neg 0 rlineto
\tclosepath clip
\t% set page contents transformation
\tdo_turn
\t{\tpagewidth 0 translate
\t\t90 rotate
\t} if
\tpagewidth colcount 1 sub mul neg
\tpageheight rowcount 1 sub mul neg
\tdo_turn {exch} if
\ttranslate
\tposterxl posteryb translate
\tsfactor dup scale
\timagexl neg imageyb neg translate
\ttiledict begin
\t0 setgray 0 setlinecap 1 setlinewidth
\t0 setlinejoin 10 setmiterlimit [] 0 setdash newpath
} bind def

/tileepilog
{\tend % of tiledict
\tgrestore
\t% print the cutmarks
\tgsave
       leftmargin botmargin translate
\tpagewidth pageheight translate cutmark 90 rotate cutmark
\t0 pagewidth translate cutmark 90 rotate cutmark
\t0 pageheight translate cutmark 90 rotate cutmark
\t0 pagewidth translate cutmark 90 rotate cutmark
\tgrestore
\t% print the page label
\t0 setgray
\tleftmargin clipmargin 3 mul add clipmargin labelsize add neg botmargin add moveto
\t(Grid \\( ) show
\trowcount strg cvs show
\t( , ) show
\tcolcount strg cvs show
\t( \\)) show
\tshowpage
} bind def

";

/// `%%BeginProlog` through `%%EndProlog`
pub fn prolog() -> String {
    let mut ps = String::new();
    ps.push_str("%%BeginProlog\n");

    ps.push_str("/cutmark\t% - cutmark -\n");
    ps.push_str("{\t\t% draw cutline\n");
    ps.push_str(&format!("\t{} setlinewidth 0 setgray\n", CUT_LINE_WIDTH));
    ps.push_str(
        "\tclipmargin\n\
         \tdup 0 moveto\n\
         \tdup neg leftmargin add 0 rlineto stroke\n\
         \t% draw sheet alignment mark\n\
         \tdup dup neg moveto\n\
         \tdup 0 rlineto\n\
         \tdup dup lineto\n\
         \t0 rlineto\n\
         \tclosepath fill\n\
         } bind def\n\n",
    );

    ps.push_str(TILE_PROCEDURES);
    ps.push_str("%%EndProlog\n\n");
    ps
}

/// `%%BeginSetup` through `%%EndSetup`
///
/// Lengths are truncated to whole points, the scale is kept exact.
pub fn setup(config: &RunConfig, image: &BBox, plan: &LayoutPlan) -> String {
    let media_w = config.media.width() as i64;
    let media_h = config.media.height() as i64;
    let (drawable_w, drawable_h) = config.drawable_size();

    let mut ps = String::new();
    ps.push_str("%%BeginSetup\n");

    ps.push_str("% Try to inform the printer about the desired media size:\n");
    ps.push_str("/setpagedevice where \t% level-2 page commands available...\n");
    ps.push_str("{\tpop\t\t% ignore where found\n");
    ps.push_str(&format!(
        "\t3 dict dup /PageSize [ {} {} ] put\n",
        media_w, media_h
    ));
    ps.push_str("\tdup /Duplex false put\n");
    if config.manual_feed {
        ps.push_str("       dup /ManualFeed true put\n");
    }
    ps.push_str("\tsetpagedevice\n");
    ps.push_str("} if\n");

    ps.push_str(&format!("/sfactor {:.10} def\n", plan.scale));
    ps.push_str(&format!(
        "/leftmargin {} def\n",
        config.cut_margin.horizontal as i64
    ));
    ps.push_str(&format!(
        "/botmargin {} def\n",
        config.cut_margin.vertical as i64
    ));
    ps.push_str(&format!("/pagewidth {} def\n", drawable_w as i64));
    ps.push_str(&format!("/pageheight {} def\n", drawable_h as i64));
    ps.push_str(&format!("/imagexl {} def\n", image.x0 as i64));
    ps.push_str(&format!("/imageyb {} def\n", image.y0 as i64));
    ps.push_str(&format!("/posterxl {} def\n", plan.poster_box.x0 as i64));
    ps.push_str(&format!("/posteryb {} def\n", plan.poster_box.y0 as i64));
    ps.push_str(&format!("/do_turn {} def\n", plan.rotate));
    ps.push_str("/strg 10 string def\n");
    ps.push_str(&format!("/clipmargin {} def\n", CLIP_MARGIN));
    ps.push_str(&format!("/labelsize {} def\n", LABEL_SIZE));

    // The document's own page and device requests must not fire mid-tile
    ps.push_str("/tiledict 250 dict def\n");
    ps.push_str("tiledict begin\n");
    ps.push_str("% delay users showpage until cropmark is printed.\n");
    ps.push_str("/showpage {} def\n");
    ps.push_str("/setpagedevice { pop } def\n");
    ps.push_str("end\n");

    ps.push_str("/Helvetica findfont labelsize scalefont setfont\n");
    ps.push_str("%%EndSetup\n");
    ps
}
