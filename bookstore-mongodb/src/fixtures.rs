//! The sample catalogue used by `bookstore seed` and the integration tests.

use crate::book::Book;

/// Twelve classic titles covering several genres, decades and stock states.
#[rustfmt::skip]
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new("To Kill a Mockingbird", "Harper Lee", "Fiction", 1960, 12.99, true, 336, "J. B. Lippincott & Co."),
        Book::new("1984", "George Orwell", "Dystopian", 1949, 10.99, true, 328, "Secker & Warburg"),
        Book::new("The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 1925, 9.99, true, 180, "Charles Scribner's Sons"),
        Book::new("Brave New World", "Aldous Huxley", "Dystopian", 1932, 11.50, false, 311, "Chatto & Windus"),
        Book::new("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, 14.99, true, 310, "George Allen & Unwin"),
        Book::new("The Catcher in the Rye", "J.D. Salinger", "Fiction", 1951, 8.99, true, 224, "Little, Brown and Company"),
        Book::new("Pride and Prejudice", "Jane Austen", "Romance", 1813, 7.99, true, 432, "T. Egerton"),
        Book::new("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy", 1954, 19.99, true, 1178, "Allen & Unwin"),
        Book::new("Animal Farm", "George Orwell", "Political Satire", 1945, 8.50, false, 112, "Secker & Warburg"),
        Book::new("The Alchemist", "Paulo Coelho", "Fiction", 1988, 10.99, true, 197, "HarperOne"),
        Book::new("Moby Dick", "Herman Melville", "Adventure", 1851, 12.50, false, 635, "Harper & Brothers"),
        Book::new("Wuthering Heights", "Emily Brontë", "Gothic Fiction", 1847, 9.99, true, 342, "Thomas Cautley Newby"),
    ]
}
