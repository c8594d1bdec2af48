//! Demonstration driver exercising both hash map variants.
//!
//! Prints condensed versions of the classic workload examples: growth
//! under bulk inserts, on-demand resizing, tombstone removal, iteration,
//! and mode finding over a randomized sample.

#![allow(clippy::indexing_slicing)]

use primemap::{ChainedHashMap, HashMapExtensions, OpenHashMap, find_mode};
use rand::Rng;

/// Bulk-inserts 150 keys into a capacity-53 open addressing map, printing
/// table statistics every 25 inserts.
fn open_addressing_growth() {
    println!("open addressing: growth under 150 inserts");
    println!("-----------------------------------------");
    let mut map = OpenHashMap::with_capacity(53);
    for i in 0..150_u32 {
        map.put(format!("str{i}"), i.saturating_mul(100));
        if i % 25 == 24 {
            println!(
                "empty={} load={:.2} size={} capacity={}",
                map.empty_buckets(),
                map.table_load(),
                map.len(),
                map.capacity()
            );
        }
    }
}

/// Shows explicit resizing: prime rounding on construction and on demand.
fn open_addressing_resize() {
    println!("\nopen addressing: resize");
    println!("-----------------------");
    let mut map = OpenHashMap::with_capacity(20);
    map.put("key1".to_string(), 10);
    println!(
        "size={} capacity={} key1={:?} contains={}",
        map.len(),
        map.capacity(),
        map.get("key1"),
        map.contains_key("key1")
    );
    map.resize(30);
    println!(
        "size={} capacity={} key1={:?} contains={}",
        map.len(),
        map.capacity(),
        map.get("key1"),
        map.contains_key("key1")
    );
}

/// Shows tombstone removal and slot-order iteration on a small table.
fn open_addressing_remove_and_iterate() {
    println!("\nopen addressing: remove and iterate");
    println!("-----------------------------------");
    let mut map = OpenHashMap::with_capacity(10);
    for i in 0..5_u32 {
        map.put(i.to_string(), i.saturating_mul(24));
    }
    map.remove("0");
    map.remove("4");
    print!("{map}");
    for (key, value) in map.iter() {
        println!("K: {key} V: {value}");
    }
}

/// Exercises the chained map and prints its per-bucket layout.
fn chained_buckets() {
    println!("\nseparate chaining: bucket layout");
    println!("--------------------------------");
    let mut map = ChainedHashMap::with_capacity(11);
    for i in 1..6_u32 {
        map.put(i.to_string(), i.saturating_mul(10));
    }
    print!("{map}");
    println!("keys={:?}", map.keys());
    println!("empty={} load={:.2}", map.empty_buckets(), map.table_load());
}

/// Finds the mode of a randomized fruit sample.
fn mode_of_random_sample() {
    println!("\nfind_mode: randomized sample");
    println!("----------------------------");
    let fruits = ["apple", "banana", "grape", "melon", "peach"];
    let mut rng = rand::rng();
    let sample: Vec<&str> =
        (0..20).map(|_| fruits[rng.random_range(0..fruits.len())]).collect();

    let (modes, frequency) = find_mode(&sample);
    println!("sample: {sample:?}");
    println!("modes: {modes:?} frequency: {frequency}");
}

fn main() {
    open_addressing_growth();
    open_addressing_resize();
    open_addressing_remove_and_iterate();
    chained_buckets();
    mode_of_random_sample();
}
