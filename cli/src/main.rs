use anyhow::{Context, Result};
use clap::Parser;
use hotelsearch_core::{Loader, Review, SharedIndex};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "hotelsearch")]
#[command(about = "Load hotel and review JSON data and search it", long_about = None)]
struct Args {
    /// Path to the hotel catalog JSON file
    #[arg(long)]
    hotels: Option<PathBuf>,
    /// Root directory to walk for review JSON files
    #[arg(long)]
    reviews: Option<PathBuf>,
    /// Number of worker threads for review ingestion
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Dump every hotel and its reviews to this file instead of prompting
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let loader = Loader::new(args.threads)?;
    let index = loader.load(args.hotels.as_deref(), args.reviews.as_deref())?;
    tracing::info!(hotels = index.hotels().len(), "index ready");

    match args.output {
        Some(path) => write_dump(&index, &path, args.reviews.is_some()),
        None => run_prompt(&index),
    }
}

/// Write every hotel (id order) and its ranked reviews to `path`.
fn write_dump(index: &SharedIndex, path: &PathBuf, with_reviews: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create output file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for hotel in index.hotels() {
        writeln!(out, "\n********************")?;
        writeln!(out, "{}: {}", hotel.name, hotel.hotel_id)?;
        writeln!(out, "{}", hotel.address)?;
        writeln!(out, "{}", hotel.city_and_state())?;
        if !with_reviews {
            continue;
        }
        let Some(reviews) = index.find_reviews(&hotel.hotel_id) else {
            continue;
        };
        for review in reviews {
            let day = review.date_posted().get(..10).unwrap_or(review.date_posted());
            writeln!(out, "--------------------")?;
            writeln!(out, "Review by {} on {}", review.display_name(), day)?;
            writeln!(out, "Rating: {}", review.rating() as i64)?;
            writeln!(out, "ReviewId: {}", review.review_id())?;
            writeln!(out, "{}", review.title())?;
            writeln!(out, "{}", review.text())?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Interactive prompt: `find <hotelId>`, `findReviews <hotelId>`,
/// `findWord <word>`, `q` to quit.
fn run_prompt(index: &SharedIndex) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }
        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (None, ..) => println!("No command. Please enter a valid command."),
            (Some("find"), Some(hotel_id), None) => print!("{}", hotel_info(index, hotel_id)),
            (Some("findReviews"), Some(hotel_id), None) => {
                print!("{}", review_info(index, hotel_id))
            }
            (Some("findWord"), Some(word), None) => print!("{}", word_info(index, word)),
            _ => println!("Unknown command. Try find, findReviews, findWord or q."),
        }
    }
    Ok(())
}

fn hotel_info(index: &SharedIndex, hotel_id: &str) -> String {
    let Some(hotel) = index.find_hotel(hotel_id) else {
        return format!("Hotel with id {hotel_id} not found.\n");
    };
    let mut out = String::new();
    let _ = writeln!(out, "hotelName = {}", hotel.name);
    let _ = writeln!(out, "hotelId = {}", hotel.hotel_id);
    if let Some(location) = &hotel.location {
        let _ = writeln!(out, "latitude = {}", location.lat);
        let _ = writeln!(out, "longitude = {}", location.lng);
    }
    let _ = writeln!(out, "address = {}", hotel.full_address());
    out
}

fn review_info(index: &SharedIndex, hotel_id: &str) -> String {
    let Some(reviews) = index.find_reviews(hotel_id) else {
        return format!("Hotel with id {hotel_id} has no reviews.\n");
    };
    let mut out = String::new();
    for review in &reviews {
        push_review(&mut out, review);
    }
    out
}

fn word_info(index: &SharedIndex, word: &str) -> String {
    let Some(postings) = index.find_word(word) else {
        return format!("Word: {word} not found.\n");
    };
    let mut out = String::new();
    for posting in &postings {
        push_review(&mut out, &posting.review);
    }
    out
}

fn push_review(out: &mut String, review: &Review) {
    let _ = writeln!(out, "hotelId = {}", review.hotel_id());
    let _ = writeln!(out, "reviewId = {}", review.review_id());
    let _ = writeln!(out, "averageRating = {}", review.rating());
    let _ = writeln!(out, "title = {}", review.title());
    let _ = writeln!(out, "reviewText = {}", review.text());
    let _ = writeln!(out, "userNickname = {}", review.display_name());
    let _ = writeln!(out, "submissionDate = {}", review.date_posted());
    let _ = writeln!(out, "********************");
}
