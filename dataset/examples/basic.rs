use dataset::{map, prelude::*};

fn main() -> Result<(), dataset::AnyError> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "trace");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let jimmy = Value::from(map! { "name": "jimmy" });
    let erin = Value::from(map! { "name": "erin" });

    let mut people = DataSet::new();
    people.add_one(jimmy.clone(), Comparator::Deep);
    people.add_one(jimmy.clone(), Comparator::Deep);
    people.pull(&jimmy, Comparator::Deep);
    people.add_many(vec![jimmy.clone(), erin.clone()], Comparator::Deep);
    people.pull(&jimmy, Comparator::Deep);

    println!("{}", serde_json::to_string_pretty(&people)?);
    println!(
        "has erin: {}, has jimmy: {}",
        people.has_item(&erin, Comparator::Deep),
        people.has_item(&jimmy, Comparator::Deep)
    );

    people.clear();
    println!("after clear: {} items", people.len());

    Ok(())
}
