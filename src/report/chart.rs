use crate::composition::{ComparisonTable, CompositionTable};
use std::collections::BTreeMap;

const MARGIN_LEFT: u32 = 56;
const MARGIN_RIGHT: u32 = 24;
const MARGIN_TOP: u32 = 24;
const PLOT_HEIGHT: u32 = 280;
const X_LABEL_BAND: u32 = 28;
const LEGEND_BAND: u32 = 30;
const BAR_WIDTH: u32 = 18;
const BAR_GAP: u32 = 2;
const GROUP_GAP: u32 = 14;

const SERIES_COLORS: [&str; 2] = ["#3b6fb6", "#e07b39"];
const AXIS_COLOR: &str = "#444444";
const GRID_COLOR: &str = "#dddddd";

struct SvgTag {
    name: &'static str,
    // BTreeMap keeps attribute order stable, so identical tables render
    // byte-identical charts.
    attributes: BTreeMap<&'static str, String>,
}

impl SvgTag {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: BTreeMap::new(),
        }
    }

    fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.insert(key, value.to_string());
        self
    }

    fn render(&self, self_closing: bool) -> String {
        let attrs: String = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_xml(v)))
            .collect::<Vec<_>>()
            .join(" ");

        if self_closing {
            format!("<{} {}/>", self.name, attrs)
        } else {
            format!("<{} {}>", self.name, attrs)
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

struct Series {
    label: String,
    values: Vec<u64>,
}

struct ChartData {
    categories: Vec<char>,
    series: Vec<Series>,
}

/// Bar chart of one composition table, one bar per symbol.
pub(crate) fn composition_chart(table: &CompositionTable) -> String {
    let categories: Vec<char> = table.rows().iter().map(|r| r.symbol).collect();
    let values: Vec<u64> = table.rows().iter().map(|r| r.count).collect();
    let data = ChartData {
        categories,
        series: vec![Series {
            label: String::new(),
            values,
        }],
    };
    render_chart(&data, false)
}

/// Grouped bar chart of a comparison table: per symbol, one bar per
/// source protein, in the table's row order.
pub(crate) fn comparison_chart(table: &ComparisonTable) -> String {
    let categories = table.symbols();
    let series: Vec<Series> = table
        .sources()
        .into_iter()
        .map(|source| Series {
            label: source.to_string(),
            values: categories
                .iter()
                .map(|&symbol| table.get(symbol, source).unwrap_or(0))
                .collect(),
        })
        .collect();
    let data = ChartData { categories, series };
    render_chart(&data, true)
}

fn render_chart(data: &ChartData, show_legend: bool) -> String {
    let series_count = data.series.len().max(1) as u32;
    let group_width = series_count * (BAR_WIDTH + BAR_GAP) - BAR_GAP + GROUP_GAP;
    let width = MARGIN_LEFT + data.categories.len() as u32 * group_width + MARGIN_RIGHT;
    let height = MARGIN_TOP
        + PLOT_HEIGHT
        + X_LABEL_BAND
        + if show_legend { LEGEND_BAND } else { 0 };

    let max_count = data
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .max()
        .unwrap_or(0);
    let step = tick_step(max_count);
    let y_max = (max_count.div_ceil(step) * step).max(step);

    let baseline = MARGIN_TOP + PLOT_HEIGHT;
    let y_of = |value: u64| -> u32 {
        let scaled = PLOT_HEIGHT as f64 * value as f64 / y_max as f64;
        baseline - scaled.round() as u32
    };

    let mut svg = String::new();
    svg.push_str(
        &SvgTag::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", width)
            .attr("height", height)
            .attr("font-family", "Helvetica, Arial, sans-serif")
            .attr("font-size", 12)
            .render(false),
    );
    svg.push('\n');

    // Horizontal guides with count labels, then the axes on top.
    for tick in (0..=y_max).step_by(step as usize) {
        let y = y_of(tick);
        if tick > 0 {
            svg.push_str(
                &SvgTag::new("line")
                    .attr("x1", MARGIN_LEFT)
                    .attr("y1", y)
                    .attr("x2", width - MARGIN_RIGHT)
                    .attr("y2", y)
                    .attr("stroke", GRID_COLOR)
                    .render(true),
            );
            svg.push('\n');
        }
        svg.push_str(
            &SvgTag::new("text")
                .attr("x", MARGIN_LEFT - 8)
                .attr("y", y + 4)
                .attr("text-anchor", "end")
                .attr("fill", AXIS_COLOR)
                .render(false),
        );
        svg.push_str(&tick.to_string());
        svg.push_str("</text>\n");
    }

    svg.push_str(
        &SvgTag::new("line")
            .attr("x1", MARGIN_LEFT)
            .attr("y1", MARGIN_TOP)
            .attr("x2", MARGIN_LEFT)
            .attr("y2", baseline)
            .attr("stroke", AXIS_COLOR)
            .render(true),
    );
    svg.push('\n');
    svg.push_str(
        &SvgTag::new("line")
            .attr("x1", MARGIN_LEFT)
            .attr("y1", baseline)
            .attr("x2", width - MARGIN_RIGHT)
            .attr("y2", baseline)
            .attr("stroke", AXIS_COLOR)
            .render(true),
    );
    svg.push('\n');

    // Bars, one group per symbol.
    for (cat_idx, &symbol) in data.categories.iter().enumerate() {
        let group_x = MARGIN_LEFT + cat_idx as u32 * group_width + GROUP_GAP / 2;

        for (series_idx, series) in data.series.iter().enumerate() {
            let value = series.values.get(cat_idx).copied().unwrap_or(0);
            if value == 0 {
                continue;
            }
            let x = group_x + series_idx as u32 * (BAR_WIDTH + BAR_GAP);
            let y = y_of(value);
            let color = SERIES_COLORS[series_idx % SERIES_COLORS.len()];

            svg.push_str(
                &SvgTag::new("rect")
                    .attr("x", x)
                    .attr("y", y)
                    .attr("width", BAR_WIDTH)
                    .attr("height", baseline - y)
                    .attr("fill", color)
                    .render(false),
            );
            let hover = if series.label.is_empty() {
                format!("{}: {}", symbol, value)
            } else {
                format!("{}: {} ({})", symbol, value, series.label)
            };
            svg.push_str("<title>");
            svg.push_str(&escape_xml(&hover));
            svg.push_str("</title></rect>\n");
        }

        let label_x = group_x + (group_width - GROUP_GAP) / 2;
        svg.push_str(
            &SvgTag::new("text")
                .attr("x", label_x)
                .attr("y", baseline + 18)
                .attr("text-anchor", "middle")
                .attr("fill", AXIS_COLOR)
                .render(false),
        );
        svg.push_str(&escape_xml(&symbol.to_string()));
        svg.push_str("</text>\n");
    }

    if show_legend {
        let legend_y = baseline + X_LABEL_BAND + 9;
        let mut legend_x = MARGIN_LEFT;
        for (series_idx, series) in data.series.iter().enumerate() {
            let color = SERIES_COLORS[series_idx % SERIES_COLORS.len()];
            svg.push_str(
                &SvgTag::new("rect")
                    .attr("x", legend_x)
                    .attr("y", legend_y)
                    .attr("width", 12)
                    .attr("height", 12)
                    .attr("fill", color)
                    .render(true),
            );
            svg.push_str(
                &SvgTag::new("text")
                    .attr("x", legend_x + 18)
                    .attr("y", legend_y + 10)
                    .attr("fill", AXIS_COLOR)
                    .render(false),
            );
            svg.push_str(&escape_xml(&series.label));
            svg.push_str("</text>\n");
            // rough text width; exact metrics are not worth a layout pass
            legend_x += 18 + series.label.chars().count() as u32 * 7 + 24;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Guide-line spacing: the smallest of 1/2/5 times a power of ten that
/// needs at most five guides to reach `max`.
fn tick_step(max: u64) -> u64 {
    let mut base = 1u64;
    loop {
        for mult in [1u64, 2, 5] {
            let step = base * mult;
            if max / step <= 5 {
                return step;
            }
        }
        base *= 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{count, merge, NormalizedSequence};

    #[test]
    fn composition_chart_draws_one_bar_per_symbol() {
        let table = count(&NormalizedSequence::from_residues("MKTVLAA"));
        let svg = composition_chart(&table);

        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>\n"));
        // one hover title per bar
        assert_eq!(svg.matches("<title>").count(), table.len());
        assert!(svg.contains("<title>A: 2</title>"));
    }

    #[test]
    fn comparison_chart_lists_both_proteins_in_the_legend() {
        let a = count(&NormalizedSequence::from_residues("AAB"));
        let b = count(&NormalizedSequence::from_residues("BCC"));
        let merged = merge(a, "P1", b, "P2");
        let svg = comparison_chart(&merged);

        assert!(svg.contains(">P1</text>"));
        assert!(svg.contains(">P2</text>"));
        // AAB + BCC -> bars A(P1), B(P1), B(P2), C(P2)
        assert_eq!(svg.matches("<title>").count(), 4);
        assert!(svg.contains("<title>B: 1 (P1)</title>"));
        assert!(svg.contains("<title>B: 1 (P2)</title>"));
    }

    #[test]
    fn charts_are_deterministic() {
        let table = count(&NormalizedSequence::from_residues("GIVEQ"));
        assert_eq!(composition_chart(&table), composition_chart(&table));
    }

    #[test]
    fn xml_escaping_covers_markup_characters() {
        assert_eq!(escape_xml("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn tick_steps_grow_with_the_range() {
        assert_eq!(tick_step(0), 1);
        assert_eq!(tick_step(4), 1);
        assert_eq!(tick_step(8), 2);
        assert_eq!(tick_step(23), 5);
        assert_eq!(tick_step(110), 20);
        assert_eq!(tick_step(900), 200);
    }
}
