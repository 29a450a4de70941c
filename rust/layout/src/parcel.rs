// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parcel shapes from a keyword and overall dimensions

use crate::error::Error;
use floorgen_geometry::{Point2, Polygon2D, Shape};
use std::fmt;
use std::str::FromStr;

/// Aspect ratio assumed when a parcel is given by area alone
pub const DEFAULT_ASPECT_RATIO: f64 = 1.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParcelShape {
    #[default]
    Rectangle,
    Square,
    LShape,
    Triangle,
    Irregular,
    Courtyard,
}

impl ParcelShape {
    pub const ALL: [ParcelShape; 6] = [
        ParcelShape::Rectangle,
        ParcelShape::Square,
        ParcelShape::LShape,
        ParcelShape::Triangle,
        ParcelShape::Irregular,
        ParcelShape::Courtyard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParcelShape::Rectangle => "rectangle",
            ParcelShape::Square => "square",
            ParcelShape::LShape => "lshape",
            ParcelShape::Triangle => "triangle",
            ParcelShape::Irregular => "irregular",
            ParcelShape::Courtyard => "courtyard",
        }
    }

    /// Parse a keyword, falling back to a rectangle for unknown input
    pub fn parse_or_default(keyword: &str) -> Self {
        keyword.parse().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Unknown parcel shape, using rectangle");
            ParcelShape::Rectangle
        })
    }
}

impl fmt::Display for ParcelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParcelShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(ParcelShape::Rectangle),
            "square" => Ok(ParcelShape::Square),
            "lshape" | "l-shape" | "l_shape" => Ok(ParcelShape::LShape),
            "triangle" => Ok(ParcelShape::Triangle),
            "irregular" => Ok(ParcelShape::Irregular),
            "courtyard" => Ok(ParcelShape::Courtyard),
            other => Err(Error::UnknownShape(other.to_string())),
        }
    }
}

/// Parcel polygon of the given shape within a `width` × `height` box
pub fn make_parcel(shape: ParcelShape, width: f64, height: f64) -> Shape {
    let (w, h) = (width, height);
    match shape {
        ParcelShape::Rectangle => Shape::rect(0.0, 0.0, w, h),
        ParcelShape::Square => {
            let s = w.min(h);
            let dx = (w - s) / 2.0;
            let dy = (h - s) / 2.0;
            Shape::rect(dx, dy, dx + s, dy + s)
        }
        // Rectangle with the top-left corner notched out
        ParcelShape::LShape => Shape::from_coords(&[
            (0.0, 0.0),
            (w, 0.0),
            (w, h),
            (w * 0.35, h),
            (w * 0.35, h * 0.58),
            (0.0, h * 0.58),
        ]),
        ParcelShape::Triangle => Shape::from_coords(&[(0.0, 0.0), (w, 0.0), (w * 0.5, h)]),
        ParcelShape::Irregular => Shape::from_coords(&[
            (0.08 * w, 0.07 * h),
            (0.88 * w, 0.02 * h),
            (w, 0.60 * h),
            (0.78 * w, h),
            (0.18 * w, 0.92 * h),
            (0.0, 0.38 * h),
        ]),
        ParcelShape::Courtyard => {
            let outer = Polygon2D::rect(0.0, 0.0, w, h).outer;
            let hole = vec![
                Point2::new(w * 0.3, h * 0.3),
                Point2::new(w * 0.7, h * 0.3),
                Point2::new(w * 0.7, h * 0.7),
                Point2::new(w * 0.3, h * 0.7),
            ];
            Shape::from_polygon(Polygon2D::with_holes(outer, vec![hole]))
        }
    }
}

/// Width and height of a parcel of `area` m² at the default aspect ratio
pub fn parcel_dims_from_area(area: f64) -> (f64, f64) {
    let h = (area.max(0.0) / DEFAULT_ASPECT_RATIO).sqrt();
    (DEFAULT_ASPECT_RATIO * h, h)
}
