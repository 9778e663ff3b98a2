//! Shared formatting and rounding helpers for CropDash crates.

/// Display formatting helpers
pub mod format {
    /// Capitalize each word of a crop name: "winter wheat" -> "Winter Wheat".
    pub fn capitalize_crop_name(name: &str) -> String {
        name.split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Format hectares for display with two decimals: "12.40".
    pub fn format_hectares(area: f64) -> String {
        format!("{area:.2}")
    }

    /// Pluralized count label: "1 field", "3 fields".
    pub fn count_label(count: usize, noun: &str) -> String {
        if count == 1 {
            format!("{count} {noun}")
        } else {
            format!("{count} {noun}s")
        }
    }

}

/// Display rounding helpers
pub mod round {
    /// Round to the given number of decimal places.
    pub fn round_to(value: f64, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (value * factor).round() / factor
    }

    /// Round to two decimals (NDVI/EVI/SAVI display rule).
    pub fn round2(value: f64) -> f64 {
        round_to(value, 2)
    }

    /// Round to one decimal (VHI display rule).
    pub fn round1(value: f64) -> f64 {
        round_to(value, 1)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn rounds_to_decimals() {
            assert_eq!(round2(0.46666), 0.47);
            assert_eq!(round2(0.125), 0.13);
            assert_eq!(round1(48.07), 48.1);
            assert_eq!(round_to(1.23456, 3), 1.235);
        }
    }
}
