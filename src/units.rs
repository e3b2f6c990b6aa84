//! Length units. PDF user space is measured in points ([Pt]); invoice geometry is
//! expressed in millimetres ([Mm]), the same unit the layouts were designed in.

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul};

macro_rules! length_unit {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Default,
            Copy,
            Clone,
            PartialEq,
            PartialOrd,
            Add,
            Sub,
            AddAssign,
            SubAssign,
            Sum,
            Deref,
            From,
            Into,
            Display,
        )]
        pub struct $name(pub f32);

        impl $name {
            /// The larger of two lengths
            pub fn max(self, other: $name) -> $name {
                $name(self.0.max(other.0))
            }

            /// The smaller of two lengths
            pub fn min(self, other: $name) -> $name {
                $name(self.0.min(other.0))
            }
        }

        impl Mul<f32> for $name {
            type Output = $name;

            fn mul(self, rhs: f32) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f32> for $name {
            type Output = $name;

            fn div(self, rhs: f32) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl Div<$name> for $name {
            type Output = f32;

            fn div(self, rhs: $name) -> f32 {
                self.0 / rhs.0
            }
        }
    };
}

length_unit!(
    /// Typographic points, 1/72 of an inch
    Pt
);

length_unit!(
    /// Millimetres
    Mm
);

const POINTS_PER_MM: f32 = 72.0 / 25.4;

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * POINTS_PER_MM)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 / POINTS_PER_MM)
    }
}
