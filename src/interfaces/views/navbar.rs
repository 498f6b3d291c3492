use std::fmt::Write;

use crate::use_cases::navigation::Mode;

pub const BRAND: &str = "AfriData";
pub const TAGLINE: &str = "Connecting the world to Africa's verified data genius.";

pub fn render_navbar(out: &mut String, mode: Mode) {
    let (candidate, recruiter) = match mode {
        Mode::Candidate => ("[Candidate]", " Recruiter "),
        Mode::Recruiter => (" Candidate ", "[Recruiter]"),
    };
    let _ = writeln!(out, "{BRAND}  |  + Submit Project  |  {candidate}{recruiter}");
    let _ = writeln!(out, "{TAGLINE}");
    let _ = writeln!(out, "{}", "─".repeat(64));
}
