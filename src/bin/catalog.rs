use booktable::{ProbingTable, TableError};
use log::{error, info};

const BOOKS: [(&str, &str); 10] = [
    ("0-14-143951-8", "Pride and Prejudice"),
    ("0-48-626556-5", "Grimms' Fairy Tales"),
    ("0-14-310632-2", "Adventures of Huckleberry Finn"),
    ("0-14-303499-8", "Les Miserables"),
    ("0-44-100590-1", "Dune"),
    ("0-19-953556-3", "Emma"),
    ("1-50-329047-0", "The Adventures of Sherlock Holmes"),
    ("0-45-152493-5", "Nineteen Eighty-Four"),
    ("0-74-327356-4", "The Great Gatsby"),
    ("0-14-044926-3", "Crime and Punishment"),
];

fn main() -> Result<(), TableError> {
    env_logger::builder().init();

    let mut shelf = ProbingTable::default();
    println!("{shelf}\n");

    for (code, title) in BOOKS {
        shelf.put(code, title)?;
        info!(
            "shelved {code}, {} values in {} slots",
            shelf.number_of_values(),
            shelf.capacity()
        );
    }
    println!("{shelf}");

    if let Err(e) = shelf.put("0-14-1439518", "Pride and Prejudice") {
        error!("{e}");
    }

    // lend out the first six
    for (code, _) in &BOOKS[..6] {
        let title = shelf.remove(code)?;
        info!(
            "removed {title}, {} values and {} deleted",
            shelf.number_of_values(),
            shelf.number_of_deleted()
        );
    }
    println!("{shelf}");

    for code in ["0-44-100590-1", "0-74-327356-4"] {
        match shelf.get_value(code) {
            Ok(title) => println!("{code}: {title}"),
            Err(e) => println!("{e}"),
        }
    }

    shelf.clear();
    println!("{shelf}");
    Ok(())
}
