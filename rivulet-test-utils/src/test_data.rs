// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Heterogeneous fixture values for operator tests.
//!
//! Three unrelated kinds share one element type, so filtering and
//! partitioning tests can route on [`TestData::variant`].

use rivulet_core::{Event, PublishSubject};
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Animal {
    pub name: String,
    pub legs: u32,
}

/// A plant, `height` in centimetres.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Plant {
    pub species: String,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataVariant {
    Animal,
    Person,
    Plant,
}

impl DataVariant {
    /// The canonical fixture of this variant.
    pub fn fixture(self) -> TestData {
        match self {
            DataVariant::Person => person_alice(),
            DataVariant::Animal => animal_dog(),
            DataVariant::Plant => plant_rose(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TestData {
    Person(Person),
    Animal(Animal),
    Plant(Plant),
}

impl TestData {
    /// Which kind of fixture this is.
    pub fn variant(&self) -> DataVariant {
        match self {
            TestData::Person(_) => DataVariant::Person,
            TestData::Animal(_) => DataVariant::Animal,
            TestData::Plant(_) => DataVariant::Plant,
        }
    }
}

impl Display for TestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestData::Person(p) => write!(f, "{} ({})", p.name, p.age),
            TestData::Animal(a) => write!(f, "{} with {} legs", a.name, a.legs),
            TestData::Plant(p) => write!(f, "{} at {}cm", p.species, p.height),
        }
    }
}

/// Pushes an element into a test source, panicking if it already terminated.
pub fn push<E: Event + Clone>(value: E::Element, source: &PublishSubject<E>) {
    source
        .next(value)
        .expect("test source terminated before the push")
}

fn person(name: &str, age: u32) -> TestData {
    TestData::Person(Person {
        name: name.to_owned(),
        age,
    })
}

fn animal(name: &str, legs: u32) -> TestData {
    TestData::Animal(Animal {
        name: name.to_owned(),
        legs,
    })
}

pub fn person_alice() -> TestData {
    person("Alice", 25)
}

pub fn person_bob() -> TestData {
    person("Bob", 30)
}

pub fn person_charlie() -> TestData {
    person("Charlie", 35)
}

pub fn animal_dog() -> TestData {
    animal("Dog", 4)
}

pub fn animal_spider() -> TestData {
    animal("Spider", 8)
}

pub fn animal_cat() -> TestData {
    animal("Cat", 4)
}

pub fn plant_rose() -> TestData {
    TestData::Plant(Plant {
        species: "Rose".to_owned(),
        height: 15,
    })
}
