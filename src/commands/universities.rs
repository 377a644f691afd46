//! `waypoint universities` and `waypoint university` commands.

use std::fmt::Write as _;

use super::Session;
use crate::catalog::universities::{self, UniversityFilter};
use crate::context::ServiceContext;
use crate::model::University;

/// List universities matching `filter`.
///
/// # Errors
///
/// Returns an error string if the catalog cannot be read.
pub async fn run_list(
    ctx: &ServiceContext,
    session: &Session,
    filter: &UniversityFilter,
) -> Result<(), String> {
    let all = universities::load(ctx, session.page_limit)
        .await
        .map_err(|e| format!("Failed to load universities: {e}"))?;
    print!("{}", render_list(&all, filter));
    Ok(())
}

/// Show one university in full.
///
/// # Errors
///
/// Returns an error string if the lookup fails or no university has `id`.
pub async fn run_show(ctx: &ServiceContext, id: &str) -> Result<(), String> {
    let university = universities::find(ctx, id)
        .await
        .map_err(|e| format!("Failed to load university {id}: {e}"))?
        .ok_or_else(|| format!("University {id} not found"))?;
    print!("{}", render_details(&university));
    Ok(())
}

/// Renders the matching rows, or the known locations when nothing matches.
#[must_use]
pub fn render_list(all: &[University], filter: &UniversityFilter) -> String {
    let found = filter.apply(all);
    let mut out = String::new();

    if found.is_empty() {
        let _ = writeln!(out, "No universities found matching your criteria.");
        let locations = universities::unique_locations(all);
        if !locations.is_empty() {
            let _ = writeln!(out, "Known locations: {}", locations.join(", "));
        }
        return out;
    }

    let noun = if found.len() == 1 { "university" } else { "universities" };
    let _ = writeln!(out, "{} {noun} found", found.len());
    for university in found {
        let _ = write!(out, "  {}  {}", university.id, university.display_name());
        if let Some(location) = university.location.as_deref() {
            let _ = write!(out, " ({location})");
        }
        if let Some(budget) = university.estimated_budget {
            let _ = write!(out, "  ~{budget:.0}/yr");
        }
        let _ = writeln!(out);
    }
    out
}

/// Renders every known field of one university.
#[must_use]
pub fn render_details(university: &University) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", university.display_name());
    if let Some(location) = university.location.as_deref() {
        let _ = writeln!(out, "Location: {location}");
    }
    if let Some(rank) = university.global_ranking {
        let _ = writeln!(out, "Global ranking: #{rank}");
    }
    if let Some(budget) = university.estimated_budget {
        let _ = writeln!(out, "Estimated budget: {budget:.0} per year");
    }
    if let Some(programs) = university.programs_offered.as_deref() {
        let _ = writeln!(out, "Programs: {programs}");
    }
    if let Some(description) = university.description.as_deref() {
        let _ = writeln!(out, "\n{description}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::universities::BudgetBand;

    fn catalog() -> Vec<University> {
        vec![
            University {
                id: "1".into(),
                university_name: Some("TU Munich".into()),
                location: Some("Germany".into()),
                estimated_budget: Some(3_000.0),
                programs_offered: Some("Engineering".into()),
                description: Some("Technical university.".into()),
                campus_image: None,
                global_ranking: Some(28),
            },
            University {
                id: "2".into(),
                university_name: Some("McGill".into()),
                location: Some("Canada".into()),
                estimated_budget: Some(50_000.0),
                programs_offered: None,
                description: None,
                campus_image: None,
                global_ranking: None,
            },
        ]
    }

    #[test]
    fn list_uses_singular_for_one_match() {
        let filter = UniversityFilter { location: Some("Canada".into()), ..Default::default() };
        let out = render_list(&catalog(), &filter);
        assert_eq!(out, "1 university found\n  2  McGill (Canada)  ~50000/yr\n");
    }

    #[test]
    fn list_without_matches_offers_locations() {
        let filter = UniversityFilter { budget: Some(BudgetBand::Above70k), ..Default::default() };
        let out = render_list(&catalog(), &filter);
        assert!(out.starts_with("No universities found matching your criteria.\n"));
        assert!(out.contains("Known locations: Germany, Canada"));
    }

    #[test]
    fn details_skip_missing_fields() {
        let all = catalog();
        let out = render_details(&all[0]);
        assert!(out.contains("Global ranking: #28"));
        assert!(out.ends_with("\nTechnical university.\n"));

        let out = render_details(&all[1]);
        assert_eq!(out, "McGill\nLocation: Canada\nEstimated budget: 50000 per year\n");
    }
}
