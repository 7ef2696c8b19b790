use std::fmt;

use palette::Srgb;

// ---------------------------------------------------------------------------
// Metric families and their fixed colours
// ---------------------------------------------------------------------------

/// Line colour of the API-side trace, the same neutral dark for every
/// metric (the per-metric family colour only marks the USER side).
pub const API_LINE_COLOR: &str = "rgb(58, 54, 54)";

/// Opacity used for the translucent violin fill.
const FILL_ALPHA: f64 = 0.35;

/// The seven semantic IQM families. Each family has one fixed hex colour;
/// a metric inherits the colour of its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Temporal,
    Spatial,
    Noise,
    Motion,
    Artifact,
    Other,
    Descriptive,
}

impl Family {
    pub const fn hex(self) -> &'static str {
        match self {
            Family::Temporal => "#D2691E",
            Family::Spatial => "#DAA520",
            Family::Noise => "#A52A2A",
            Family::Motion => "#66CDAA",
            Family::Artifact => "#6495ED",
            Family::Other => "#9932CC",
            Family::Descriptive => "#00008B",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Temporal => "temporal",
            Family::Spatial => "spatial",
            Family::Noise => "noise",
            Family::Motion => "motion",
            Family::Artifact => "artifact",
            Family::Other => "other",
            Family::Descriptive => "descriptive",
        };
        f.write_str(name)
    }
}

/// Static metric → family table. Note the gaps: the dimensional metrics
/// (`size_*`, `spacing_*`) are in the request vocabulary but have no
/// family here, so plotting them fails the colour lookup. There is no
/// fallback colour.
static METRIC_FAMILIES: &[(&str, Family)] = &[
    // temporal
    ("tsnr", Family::Temporal),
    ("gcor", Family::Temporal),
    ("dvars_vstd", Family::Temporal),
    ("dvars_std", Family::Temporal),
    ("dvars_nstd", Family::Temporal),
    // spatial
    ("fwhm_x", Family::Spatial),
    ("fwhm_y", Family::Spatial),
    ("fwhm_z", Family::Spatial),
    ("fwhm_avg", Family::Spatial),
    ("fber", Family::Spatial),
    ("efc", Family::Spatial),
    // noise
    ("cjv", Family::Noise),
    ("cnr", Family::Noise),
    ("qi_2", Family::Noise),
    ("snr", Family::Noise),
    ("snr_csf", Family::Noise),
    ("snr_gm", Family::Noise),
    ("snr_wm", Family::Noise),
    ("snr_total", Family::Noise),
    ("snrd_csf", Family::Noise),
    ("snrd_gm", Family::Noise),
    ("snrd_wm", Family::Noise),
    // motion
    ("fd_mean", Family::Motion),
    ("fd_num", Family::Motion),
    ("fd_perc", Family::Motion),
    // artifact
    ("inu_med", Family::Artifact),
    ("inu_range", Family::Artifact),
    ("wm2max", Family::Artifact),
    // other
    ("aor", Family::Other),
    ("aqi", Family::Other),
    ("dummy_trs", Family::Other),
    ("gsr_x", Family::Other),
    ("gsr_y", Family::Other),
    ("qi_1", Family::Other),
    ("rpve_csf", Family::Other),
    ("rpve_gm", Family::Other),
    ("rpve_wm", Family::Other),
    ("tpm_overlap_csf", Family::Other),
    ("tpm_overlap_gm", Family::Other),
    ("tpm_overlap_wm", Family::Other),
    // descriptive
    ("icvs_csf", Family::Descriptive),
    ("icvs_gm", Family::Descriptive),
    ("icvs_wm", Family::Descriptive),
    ("summary_bg_k", Family::Descriptive),
    ("summary_bg_mad", Family::Descriptive),
    ("summary_bg_mean", Family::Descriptive),
    ("summary_bg_median", Family::Descriptive),
    ("summary_bg_n", Family::Descriptive),
    ("summary_bg_p05", Family::Descriptive),
    ("summary_bg_p95", Family::Descriptive),
    ("summary_bg_stdv", Family::Descriptive),
    ("summary_csf_k", Family::Descriptive),
    ("summary_csf_mad", Family::Descriptive),
    ("summary_csf_mean", Family::Descriptive),
    ("summary_csf_median", Family::Descriptive),
    ("summary_csf_n", Family::Descriptive),
    ("summary_csf_p05", Family::Descriptive),
    ("summary_csf_p95", Family::Descriptive),
    ("summary_csf_stdv", Family::Descriptive),
    ("summary_fg_k", Family::Descriptive),
    ("summary_fg_mad", Family::Descriptive),
    ("summary_fg_mean", Family::Descriptive),
    ("summary_fg_median", Family::Descriptive),
    ("summary_fg_n", Family::Descriptive),
    ("summary_fg_p05", Family::Descriptive),
    ("summary_fg_p95", Family::Descriptive),
    ("summary_fg_stdv", Family::Descriptive),
    ("summary_gm_k", Family::Descriptive),
    ("summary_gm_mad", Family::Descriptive),
    ("summary_gm_mean", Family::Descriptive),
    ("summary_gm_median", Family::Descriptive),
    ("summary_gm_n", Family::Descriptive),
    ("summary_gm_p05", Family::Descriptive),
    ("summary_gm_p95", Family::Descriptive),
    ("summary_gm_stdv", Family::Descriptive),
    ("summary_wm_k", Family::Descriptive),
    ("summary_wm_mad", Family::Descriptive),
    ("summary_wm_mean", Family::Descriptive),
    ("summary_wm_median", Family::Descriptive),
    ("summary_wm_n", Family::Descriptive),
    ("summary_wm_p05", Family::Descriptive),
    ("summary_wm_p95", Family::Descriptive),
    ("summary_wm_stdv", Family::Descriptive),
];

/// Family of a metric, if the colour table knows it.
pub fn family_of(metric: &str) -> Option<Family> {
    METRIC_FAMILIES
        .iter()
        .find(|(name, _)| *name == metric)
        .map(|(_, family)| *family)
}

/// USER-side line colour for a metric (its family's hex colour).
pub fn line_color(metric: &str) -> Option<&'static str> {
    family_of(metric).map(Family::hex)
}

/// Translucent fill derived from a hex line colour.
pub fn fill_color(hex: &str) -> String {
    let rgb: Srgb<u8> = hex.parse().unwrap_or(Srgb::new(0, 0, 0));
    format!(
        "rgba({}, {}, {}, {FILL_ALPHA})",
        rgb.red, rgb.green, rgb.blue
    )
}

/// Translucent fill for the API-side trace.
pub fn api_fill_color() -> String {
    format!("rgba(58, 54, 54, {FILL_ALPHA})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::QC_VOCABULARY;

    #[test]
    fn family_colours_match_the_fixed_table() {
        assert_eq!(line_color("tsnr"), Some("#D2691E"));
        assert_eq!(line_color("fwhm_avg"), Some("#DAA520"));
        assert_eq!(line_color("snr"), Some("#A52A2A"));
        assert_eq!(line_color("fd_mean"), Some("#66CDAA"));
        assert_eq!(line_color("wm2max"), Some("#6495ED"));
        assert_eq!(line_color("aor"), Some("#9932CC"));
        assert_eq!(line_color("summary_wm_p95"), Some("#00008B"));
    }

    #[test]
    fn dimensional_metrics_have_no_colour() {
        // In the vocabulary, but deliberately absent from the colour table.
        for metric in ["size_t", "size_x", "size_y", "size_z", "spacing_tr"] {
            assert!(QC_VOCABULARY.contains(&metric));
            assert_eq!(family_of(metric), None);
        }
    }

    #[test]
    fn table_has_the_expected_shape() {
        assert_eq!(METRIC_FAMILIES.len(), 83);
        let descriptive = METRIC_FAMILIES
            .iter()
            .filter(|(_, f)| *f == Family::Descriptive)
            .count();
        assert_eq!(descriptive, 43);
    }

    #[test]
    fn fills_are_translucent_versions_of_the_line() {
        assert_eq!(fill_color("#A52A2A"), "rgba(165, 42, 42, 0.35)");
        assert_eq!(api_fill_color(), "rgba(58, 54, 54, 0.35)");
        // Every family hex must parse; the black fallback would show up here.
        for family in [
            Family::Temporal,
            Family::Spatial,
            Family::Noise,
            Family::Motion,
            Family::Artifact,
            Family::Other,
            Family::Descriptive,
        ] {
            assert_ne!(fill_color(family.hex()), "rgba(0, 0, 0, 0.35)");
        }
    }
}
