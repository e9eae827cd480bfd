//! Vehicles and the ordered list that holds them.

use std::fmt;

use tracing::info;

use crate::error::{Result, StockError};

/// One vehicle record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    pub year: i64,
}

impl Vehicle {
    #[must_use]
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i64) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.make, self.model, self.year)
    }
}

/// Vehicles in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    vehicles: Vec<Vehicle>,
}

impl Inventory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vehicles: Vec::new(),
        }
    }

    /// Append a vehicle at the end.
    pub fn add(&mut self, vehicle: Vehicle) {
        info!(%vehicle, "vehicle added");
        self.vehicles.push(vehicle);
    }

    /// Remove the vehicle at 0-based `index`, shifting later ones down.
    ///
    /// # Errors
    ///
    /// [`StockError::IndexOutOfRange`] for a negative or too-large index;
    /// the inventory is unchanged.
    pub fn remove(&mut self, index: i64) -> Result<Vehicle> {
        let len = self.vehicles.len();
        let i = usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or(StockError::IndexOutOfRange { index, len })?;
        let vehicle = self.vehicles.remove(i);
        info!(%vehicle, index, "vehicle removed");
        Ok(vehicle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    /// One `"{i}) {make} {model} {year}"` line per vehicle, 0-based.
    #[must_use]
    pub fn listing(&self) -> Vec<String> {
        self.vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{i}) {v}"))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
