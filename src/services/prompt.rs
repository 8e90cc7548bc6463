// src/services/prompt.rs

const PREAMBLE: &str = "\
You are a friendly, enthusiastic, deeply thoughtful, and reflective AI guide for the \"Dr. Deas Book Log\", a project tracking a journey to 1,000 books.
You have been given access to the entire reading list.

Your mission is to help visitors and friends discover interesting patterns and find great books within this collection.
Analyze the book list to answer questions and provide insightful recommendations based on the themes present.

When you speak, refer to the owner of the book log as \"Dr. Deas\" (he/him).
Address the person you are chatting with directly as \"you\".";

const FENCE: &str = "---";

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    sanitize: bool,
}

impl PromptBuilder {
    pub fn new(sanitize: bool) -> Self {
        Self { sanitize }
    }

    /// Values are interpolated verbatim unless sanitizing is on.
    pub fn build(&self, books: &str, query: &str) -> String {
        let (books, query) = if self.sanitize {
            (sanitize_books(books), sanitize_query(query))
        } else {
            (books.to_string(), query.to_string())
        };

        format!(
            "{PREAMBLE}\n\nHere is the book data:\n{FENCE}\n{books}\n{FENCE}\n\n\
             Now, thoughtfully answer the user's question.\n\n\
             User's question: \"{query}\"\n"
        )
    }
}

fn sanitize_books(books: &str) -> String {
    books
        .lines()
        .map(|line| if line.trim() == FENCE { "- - -" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

fn sanitize_query(query: &str) -> String {
    query
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('"', "'")
}
