use crate::ranking::SearchResults;

const HEADERS: [&str; 6] = [
    "Type",
    "Name",
    "Rating",
    "User Rating Count",
    "Distance (km)",
    "Address",
];

/// Aligned text table over the ranked collection
#[must_use]
pub fn render_table(results: &SearchResults) -> String {
    let center = &results.destination;
    let rows: Vec<[String; 6]> = results
        .collection()
        .iter()
        .map(|r| {
            [
                r.category.label().to_string(),
                r.name.clone(),
                r.rating.map(|v| format!("{v:.1}")).unwrap_or_default(),
                r.rating_count.map(|c| c.to_string()).unwrap_or_default(),
                r.coordinates()
                    .map(|(lat, lon)| format!("{:.1}", center.distance_km(lat, lon)))
                    .unwrap_or_default(),
                r.address.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&HEADERS.map(str::to_string), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(rows.iter().map(|row| format_row(row, &widths)));
    lines.join("\n")
}

fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
