//! Query the TMDB catalog the way the routes do and print the resulting cards.
//! Usage:
//!   cargo run --bin catalog_props -- discover
//!   cargo run --bin catalog_props -- search <query>
//!   cargo run --bin catalog_props -- detail movie|tv <query>
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::{bail, Context, Result};
use cinetica::media::Media;
use cinetica::present::{Card, DetailView};
use cinetica::tmdb::{CatalogApi, TmdbClient};
use dotenvy::dotenv;
use std::env;

fn print_cards(label: &str, items: Vec<Media>) {
    println!("== {} ({})", label, items.len());
    for media in &items {
        let card = Card::from(media);
        println!(
            "{:>8}  {:<40}  {:<14}  {}",
            card.id, card.title, card.date, card.rating
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let client = TmdbClient::from_env()?;
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("discover") => {
            let (movies, shows) =
                tokio::try_join!(client.discover_movies(), client.discover_shows())?;
            print_cards("Movies", movies.results.into_iter().map(Media::from).collect());
            print_cards("TV Shows", shows.results.into_iter().map(Media::from).collect());
        }
        Some("search") => {
            let query = args.get(1..).map(|a| a.join(" ")).unwrap_or_default();
            if query.trim().is_empty() {
                bail!("search needs a query");
            }
            let (movies, shows) =
                tokio::try_join!(client.search_movies(&query), client.search_shows(&query))?;
            print_cards("Movies", movies.results.into_iter().map(Media::from).collect());
            print_cards("TV Shows", shows.results.into_iter().map(Media::from).collect());
        }
        Some("detail") => {
            let kind = args.get(1).context("detail needs 'movie' or 'tv'")?;
            let query = args.get(2..).map(|a| a.join(" ")).unwrap_or_default();
            let media: Media = match kind.to_lowercase().as_str() {
                "movie" => client
                    .search_movies(&query)
                    .await?
                    .results
                    .into_iter()
                    .next()
                    .map(Media::from),
                "tv" => client
                    .search_shows(&query)
                    .await?
                    .results
                    .into_iter()
                    .next()
                    .map(Media::from),
                _ => bail!("media kind must be 'movie' or 'tv'"),
            }
            .with_context(|| format!("No TMDB match for '{}'", query))?;
            let detail = DetailView::from(&media);
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        _ => bail!("usage: catalog_props discover | search <query> | detail movie|tv <query>"),
    }

    Ok(())
}
