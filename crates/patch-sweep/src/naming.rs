//! File names describing a parameter point

use crate::grid::ParameterPoint;

/// Format a float the way the analysis notebooks expect it in file names
///
/// Integral values keep a trailing `.0` (`1.0`, not `1`); everything else
/// uses the shortest representation that parses back to the same value.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// `{prefix}N-{N}_m-{m}_f-{f}_h-{h}_tc-{tc}_lfm-l-{local}_lfm-g-{global}_r-{r}{suffix}{ending}`
pub fn file_name(point: &ParameterPoint, prefix: &str, suffix: &str, ending: &str) -> String {
    format!(
        "{prefix}N-{}_m-{}_f-{}_h-{}_tc-{}_lfm-l-{}_lfm-g-{}_r-{}{suffix}{ending}",
        point.node_count,
        point.edges_per_node,
        format_float(point.minority_fraction),
        format_float(point.homophily),
        format_float(point.triadic_closure),
        point.lfm_local,
        point.lfm_global,
        point.realization,
    )
}

/// Name of the JSON dump of a point's graph
pub fn graph_file_name(point: &ParameterPoint) -> String {
    file_name(point, "", "", ".json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanism::Lfm;

    fn point() -> ParameterPoint {
        ParameterPoint {
            node_count: 5000,
            edges_per_node: 2,
            minority_fraction: 0.3,
            homophily: 0.8,
            triadic_closure: 0.0,
            lfm_global: Lfm::Pah,
            lfm_local: Lfm::Random,
            realization: 7,
        }
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.3), "0.3");
        assert_eq!(format_float(0.99), "0.99");
        assert_eq!(format_float(f64::NAN), "NaN");
    }

    #[test]
    fn test_graph_file_name() {
        assert_eq!(
            graph_file_name(&point()),
            "N-5000_m-2_f-0.3_h-0.8_tc-0.0_lfm-l-random_lfm-g-pah_r-7.json"
        );
    }

    #[test]
    fn test_prefix_and_suffix() {
        assert_eq!(
            file_name(&point(), "deg_", "_v2", ".csv"),
            "deg_N-5000_m-2_f-0.3_h-0.8_tc-0.0_lfm-l-random_lfm-g-pah_r-7_v2.csv"
        );
    }
}
