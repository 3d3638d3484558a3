#![allow(dead_code)]

use book_recommendation_service::models::{Book, PopularRecord};
use book_recommendation_service::services::{
    ArtifactPaths, ArtifactSet, InteractionArtifact, SimilarityArtifact,
};
use std::path::Path;

pub fn book(title: &str, author: &str) -> Book {
    Book {
        title: title.to_string(),
        author: author.to_string(),
        image_url: format!("http://images.amazon.com/images/P/{}.jpg", title.len()),
        rating_count: Some(100),
        avg_rating: Some(7.0),
    }
}

fn popular(title: &str, author: &str, num_ratings: u64, score: Option<f64>) -> PopularRecord {
    PopularRecord {
        title: title.to_string(),
        author: author.to_string(),
        image_url: format!("http://images.amazon.com/images/P/{}.jpg", title.len()),
        num_ratings,
        avg_rating: 8.0,
        score,
    }
}

/// Four books where A's similarity row is `[1.0, 0.8, 0.5, 0.1]`,
/// plus a 50-entry popularity list.
pub fn toy_artifacts() -> ArtifactSet {
    let titles = ["A", "B", "C", "D"];

    ArtifactSet {
        catalog: titles.iter().map(|t| book(t, &format!("Author {}", t))).collect(),
        popularity: (0..50)
            .map(|i| {
                popular(
                    &format!("Popular Book {:02}", i),
                    "Various",
                    1000 - i as u64,
                    Some(100.0 - i as f64),
                )
            })
            .collect(),
        interaction: InteractionArtifact {
            row_labels: titles.iter().map(|t| t.to_string()).collect(),
            column_labels: vec!["276725".into(), "276726".into(), "276727".into()],
            values: vec![
                vec![5.0, 0.0, 8.0],
                vec![4.0, 0.0, 9.0],
                vec![0.0, 7.0, 6.0],
                vec![0.0, 10.0, 0.0],
            ],
        },
        similarity: SimilarityArtifact {
            labels: Some(titles.iter().map(|t| t.to_string()).collect()),
            scores: vec![
                vec![1.0, 0.8, 0.5, 0.1],
                vec![0.8, 1.0, 0.3, 0.2],
                vec![0.5, 0.3, 1.0, 0.6],
                vec![0.1, 0.2, 0.6, 1.0],
            ],
        },
    }
}

pub const LIBRARY_TITLES: [&str; 6] = [
    "1984",
    "Animal Farm",
    "Brave New World",
    "Harry Potter and the Chamber of Secrets (Book 2)",
    "Harry Potter and the Sorcerer's Stone (Book 1)",
    "The Hobbit",
];

/// Six real-looking titles with fuzzy-matching traps and score ties.
pub fn library_artifacts() -> ArtifactSet {
    let authors = [
        "George Orwell",
        "George Orwell",
        "Aldous Huxley",
        "J. K. Rowling",
        "J. K. Rowling",
        "J.R.R. Tolkien",
    ];

    let mut catalog: Vec<Book> = LIBRARY_TITLES
        .iter()
        .zip(authors.iter())
        .map(|(t, a)| book(t, a))
        .collect();
    // another edition of 1984, and a book that never made the similarity cut
    catalog.push(book("1984", "Orwell (Signet Classics)"));
    catalog.push(book("Obscure Pamphlet", "Nobody"));

    ArtifactSet {
        catalog,
        popularity: vec![
            popular("Harry Potter and the Sorcerer's Stone (Book 1)", "J. K. Rowling", 571, None),
            popular("The Hobbit", "J.R.R. Tolkien", 281, None),
            popular("1984", "George Orwell", 284, None),
            popular("Animal Farm", "George Orwell", 250, None),
        ],
        interaction: InteractionArtifact {
            row_labels: LIBRARY_TITLES.iter().map(|t| t.to_string()).collect(),
            column_labels: vec!["u1".into(), "u2".into(), "u3".into()],
            values: vec![
                vec![9.0, 0.0, 7.0],
                vec![8.0, 0.0, 6.0],
                vec![7.0, 5.0, 0.0],
                vec![0.0, 10.0, 9.0],
                vec![0.0, 9.0, 10.0],
                vec![3.0, 8.0, 8.0],
            ],
        },
        similarity: SimilarityArtifact {
            labels: None,
            scores: vec![
                vec![1.0, 0.9, 0.7, 0.1, 0.2, 0.3],
                vec![0.9, 1.0, 0.6, 0.05, 0.15, 0.25],
                vec![0.7, 0.6, 1.0, 0.2, 0.2, 0.4],
                vec![0.1, 0.05, 0.2, 1.0, 0.95, 0.5],
                vec![0.2, 0.15, 0.2, 0.95, 1.0, 0.5],
                vec![0.3, 0.25, 0.4, 0.5, 0.5, 1.0],
            ],
        },
    }
}

/// Writes the set as JSON under `dir` using the default file names.
pub fn write_json(set: &ArtifactSet, dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths::in_dir(dir);
    set.write(&paths).expect("write json artifacts");
    paths
}

pub fn write_bincode(set: &ArtifactSet, dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths {
        catalog: dir.join("books.bin"),
        popularity: dir.join("popular.bin"),
        interaction: dir.join("pt.bin"),
        similarity: dir.join("similarity_scores.bin"),
    };
    set.write(&paths).expect("write bincode artifacts");
    paths
}
