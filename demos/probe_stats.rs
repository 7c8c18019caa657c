use clap::Parser;
use ordered_sets::OrderedHashSet;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Remove every n-th value after filling, leaving tombstones behind.
    #[arg(short = 'r', long = "remove_every", default_value_t = 0)]
    remove_every: usize,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating OrderedHashSet with target capacity: {}",
        args.target_capacity
    );

    let mut set: OrderedHashSet<u64> = OrderedHashSet::with_capacity(args.target_capacity);

    println!("Actual capacity: {}", set.capacity());
    println!("Index slots: {}", set.slot_count());
    println!("Filling set with u64 values...");

    let num_values = set.capacity() - 1;
    for i in 0..num_values {
        let value = i as u64;
        if !set.add(value) {
            panic!("Value already exists in set: {}", value);
        }
    }

    if args.remove_every > 0 {
        let mut removed = 0;
        for i in (0..num_values).step_by(args.remove_every) {
            if set.remove(&(i as u64)) {
                removed += 1;
            }
        }
        println!("Removed {} values", removed);
    }

    println!("Set holds {} values", set.len());
    println!(
        "Final load factor: {:.2}%",
        (set.len() as f64 / set.slot_count() as f64) * 100.0
    );

    let histogram = set.probe_histogram();
    histogram.print();
    match histogram.max_displacement() {
        Some(max) => println!("Longest probe: {} slots past home", max),
        None => println!("Set is empty"),
    }
}
