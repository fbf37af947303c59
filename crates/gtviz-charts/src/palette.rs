//! Plotly's default qualitative palette ("Plotly").

pub const PLOTLY: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A",
    "#19d3f3", "#FF6692", "#B6E880", "#FF97FF", "#FECB52",
];

/// Colour of the `i`-th category, cycling through the palette.
pub fn color(i: usize) -> &'static str {
    PLOTLY[i % PLOTLY.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(color(0), "#636efa");
        assert_eq!(color(10), color(0));
        assert_eq!(color(13), "#ab63fa");
    }
}
