//! Seed records and seeding configuration.

use trivia_models::CategoryId;

/// The categories every seeded database starts with, in id order.
pub const STANDARD_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// A question ready to insert.
#[derive(Debug, Clone)]
pub struct QuestionSeed {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

/// A bundled question, filed under a category by name.
pub struct SampleQuestion {
    pub question: &'static str,
    pub answer: &'static str,
    pub category: &'static str,
    pub difficulty: i32,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub include_samples: bool,
    pub generated_questions: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            include_samples: true,
            generated_questions: 0,
        }
    }
}

impl SeedConfig {
    /// Bundled samples plus `generated_questions` fake ones.
    pub fn new(generated_questions: usize) -> Self {
        Self {
            generated_questions,
            ..Default::default()
        }
    }

    pub fn without_samples(mut self) -> Self {
        self.include_samples = false;
        self
    }
}
