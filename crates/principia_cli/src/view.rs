//! Pure presentation helpers over a fetched principle list.

use principia_core::PrincipleWithTactics;

/// Distinct categories in first-seen order.
pub fn categories(principles: &[PrincipleWithTactics]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for entry in principles {
        let category = entry.principle.category.as_str();
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// Principles in `category`, or all of them when `category` is `None`.
pub fn filter_by_category<'a>(
    principles: &'a [PrincipleWithTactics],
    category: Option<&str>,
) -> Vec<&'a PrincipleWithTactics> {
    principles
        .iter()
        .filter(|entry| category.map_or(true, |wanted| entry.principle.category == wanted))
        .collect()
}

/// Summary figures shown above the principle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStats {
    pub principles: usize,
    pub tactics: usize,
    pub categories: usize,
    /// Average tactics per principle, one decimal; `0` for an empty list.
    pub average_tactics: String,
}

impl DisplayStats {
    pub fn from_principles(principles: &[PrincipleWithTactics]) -> Self {
        let tactics = principles.iter().map(|entry| entry.tactics.len()).sum();
        let average_tactics = if principles.is_empty() {
            "0".to_string()
        } else {
            format!("{:.1}", tactics as f64 / principles.len() as f64)
        };

        Self {
            principles: principles.len(),
            tactics,
            categories: categories(principles).len(),
            average_tactics,
        }
    }
}

/// Renders principles grouped under their category headings.
pub fn render_grouped(principles: &[&PrincipleWithTactics]) -> String {
    let mut out = String::new();
    let mut order: Vec<&str> = Vec::new();
    for entry in principles {
        let category = entry.principle.category.as_str();
        if !order.contains(&category) {
            order.push(category);
        }
    }

    for category in order {
        out.push_str(&format!("== {category} ==\n"));
        for entry in principles
            .iter()
            .filter(|entry| entry.principle.category == category)
        {
            let principle = &entry.principle;
            out.push_str(&format!(
                "[{}] {} ({})\n    {}\n",
                principle.color.as_str(),
                principle.title,
                principle.id,
                principle.description
            ));
            for tactic in &entry.tactics {
                let marker = if tactic.is_effective { "+" } else { "-" };
                out.push_str(&format!("    {marker} {} ({})\n", tactic.title, tactic.id));
                if let Some(description) = &tactic.description {
                    out.push_str(&format!("        {description}\n"));
                }
            }
        }
    }

    if out.is_empty() {
        out.push_str("No principles.\n");
    }
    out
}

/// Renders the stats block.
pub fn render_stats(stats: &DisplayStats) -> String {
    format!(
        "principles: {}\ntactics: {}\ncategories: {}\navg tactics per principle: {}\n",
        stats.principles, stats.tactics, stats.categories, stats.average_tactics
    )
}
