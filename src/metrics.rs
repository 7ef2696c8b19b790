use log::info;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Fixed IQM vocabulary
// ---------------------------------------------------------------------------

/// Every metric name a caller may request, in the order an empty request
/// plots them. Not configurable at call time.
pub const QC_VOCABULARY: [&str; 44] = [
    "aor",
    "aqi",
    "dummy_trs",
    "dvars_nstd",
    "dvars_std",
    "dvars_vstd",
    "efc",
    "fber",
    "fd_mean",
    "fd_num",
    "fd_perc",
    "fwhm_avg",
    "fwhm_x",
    "fwhm_y",
    "fwhm_z",
    "gcor",
    "gsr_x",
    "gsr_y",
    "size_t",
    "size_x",
    "size_y",
    "size_z",
    "snr",
    "spacing_tr",
    "spacing_x",
    "spacing_y",
    "spacing_z",
    "summary_bg_k",
    "summary_bg_mad",
    "summary_bg_mean",
    "summary_bg_median",
    "summary_bg_n",
    "summary_bg_p05",
    "summary_bg_p95",
    "summary_bg_stdv",
    "summary_fg_k",
    "summary_fg_mad",
    "summary_fg_mean",
    "summary_fg_median",
    "summary_fg_n",
    "summary_fg_p05",
    "summary_fg_p95",
    "summary_fg_stdv",
    "tsnr",
];

/// Whether a name is in the fixed vocabulary.
pub fn is_recognized(name: &str) -> bool {
    QC_VOCABULARY.contains(&name)
}

/// Resolve the effective metric list for one render call.
///
/// An empty request means "plot everything": the full vocabulary in its
/// declared order. A non-empty request is validated name by name, in caller
/// order, and the first unrecognized name aborts the whole call before any
/// reshape or plotting work happens.
pub fn resolve<'a>(requested: &[&'a str]) -> Result<Vec<&'a str>> {
    if requested.is_empty() {
        info!("no metrics requested; plotting the full vocabulary");
        return Ok(QC_VOCABULARY.to_vec());
    }
    for name in requested {
        if !is_recognized(name) {
            return Err(Error::UnrecognizedVariable((*name).to_string()));
        }
    }
    info!("plotting requested metrics: {requested:?}");
    Ok(requested.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_selects_full_vocabulary_in_order() {
        let resolved = resolve(&[]).unwrap();
        assert_eq!(resolved, QC_VOCABULARY.to_vec());
        assert_eq!(resolved.len(), 44);
    }

    #[test]
    fn request_order_is_preserved() {
        let resolved = resolve(&["tsnr", "aor", "snr"]).unwrap();
        assert_eq!(resolved, vec!["tsnr", "aor", "snr"]);
    }

    #[test]
    fn unknown_name_aborts() {
        let err = resolve(&["snr", "not_a_real_metric"]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedVariable(name) if name == "not_a_real_metric"
        ));
    }

    #[test]
    fn vocabulary_names_match_their_columns() {
        assert!(is_recognized("snr"));
        assert!(is_recognized("summary_fg_stdv"));
        assert!(!is_recognized("SNR"));
        assert!(!is_recognized("cjv")); // colourable, but not requestable
    }
}
