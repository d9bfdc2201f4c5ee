//! Browse the school directory
//!
//! The full listing is fetched once; search and state filtering happen
//! locally on that copy.
//!
//! ```bash
//! schoolctl list --search pune --state Maharashtra
//! schoolctl list --output json | jq '.[].email_id'
//! ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use schoolctl_core::{unique_states, Listing, ListingFilter};

use crate::client::SchoolClient;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    /// One id per line
    Quiet,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Case-insensitive match on name, city, or address
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Only schools in this state (exact match)
    #[arg(long)]
    pub state: Option<String>,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct StatesArgs {
    /// Print as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn run_list(args: ListArgs, endpoint: &str) -> Result<()> {
    let schools = SchoolClient::new(endpoint)?.list().await?;
    let filter = ListingFilter::new(args.search, args.state);
    let listing = filter.listing(&schools);

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing.shown)?),
        OutputFormat::Quiet => {
            for school in &listing.shown {
                println!("{}", school.id);
            }
        }
        OutputFormat::Human => print!("{}", render_human(&listing)),
    }

    Ok(())
}

pub async fn run_states(args: StatesArgs, endpoint: &str) -> Result<()> {
    let schools = SchoolClient::new(endpoint)?.list().await?;
    let states = unique_states(&schools);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&states)?);
    } else {
        for state in states {
            println!("{}", state);
        }
    }

    Ok(())
}

fn render_human(listing: &Listing<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("┌─ {}\n│\n", listing.summary()));

    if let Some(hint) = listing.empty_hint() {
        out.push_str(&format!("└─ {}\n", hint));
        return out;
    }

    for (i, school) in listing.shown.iter().enumerate() {
        let is_last = i == listing.shown.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let cont = if is_last { "   " } else { "│  " };

        out.push_str(&format!("{} [{}] {}\n", prefix, school.id, school.name));
        out.push_str(&format!("{}{}, {}, {}\n", cont, school.address, school.city, school.state));
        out.push_str(&format!("{}{} · {}\n", cont, school.contact, school.email_id));
        if let Some(image) = &school.image {
            out.push_str(&format!("{}image: {}\n", cont, image));
        }
        if !is_last {
            out.push_str("│\n");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use schoolctl_core::School;

    fn school(id: i64, name: &str, city: &str, state: &str) -> School {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        School {
            id,
            name: name.into(),
            address: "1 Long Street Name".into(),
            city: city.into(),
            state: state.into(),
            contact: "9876543210".into(),
            email_id: "office@school.edu".into(),
            image: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn human_output_lists_matches() {
        let schools = vec![
            school(2, "Riverside Public", "Pune", "Maharashtra"),
            school(1, "Hillside Academy", "Shimla", "Himachal Pradesh"),
        ];
        let listing = ListingFilter::new("", Some("Maharashtra".into())).listing(&schools);
        let out = render_human(&listing);

        assert!(out.starts_with("┌─ Showing 1 of 2 schools"));
        assert!(out.contains("└─ [2] Riverside Public"));
        assert!(!out.contains("Hillside"));
    }

    #[test]
    fn human_output_empty_hints() {
        let none: Vec<School> = Vec::new();
        let out = render_human(&ListingFilter::default().listing(&none));
        assert!(out.contains("No schools have been added yet."));

        let schools = vec![school(1, "Hillside Academy", "Shimla", "Himachal Pradesh")];
        let out = render_human(&ListingFilter::new("zzz", None).listing(&schools));
        assert!(out.contains("Showing 0 of 1 schools"));
        assert!(out.contains("Try adjusting your search criteria or filters."));
    }
}
