//! OpenStreetMap attributes of road edges and compact sets of them.

use std::fmt;

use crate::error::{Result, VeloError};

/// An OpenStreetMap `key=value` tag carried by edges.
///
/// The discriminant is the attribute's bit index inside an [`AttributeSet`];
/// the order matches the attribute table of the graph files and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    HighwayService,
    HighwayTrack,
    HighwayResidential,
    HighwayFootway,
    HighwayPath,
    HighwayUnclassified,
    HighwayTertiary,
    HighwaySecondary,
    HighwayCycleway,
    HighwayPrimary,
    HighwayLivingStreet,
    HighwaySteps,
    HighwayPedestrian,
    HighwayTrunk,
    HighwayMotorwayLink,
    HighwayTrunkLink,
    HighwayPrimaryLink,
    HighwaySecondaryLink,
    HighwayTertiaryLink,
    HighwayBridleway,
    HighwayRoad,
    HighwayMotorway,
    TracktypeGrade1,
    TracktypeGrade2,
    TracktypeGrade3,
    TracktypeGrade4,
    TracktypeGrade5,
    SurfaceAsphalt,
    SurfaceUnpaved,
    SurfaceGravel,
    SurfacePaved,
    SurfaceGround,
    SurfaceCompacted,
    SurfaceGrass,
    SurfaceDirt,
    SurfaceFineGravel,
    SurfacePavingStones,
    SurfaceConcrete,
    SurfaceWood,
    SurfaceSett,
    SurfaceSand,
    SurfaceCobblestone,
    SurfaceMud,
    OnewayYes,
    OnewayM1,
    OnewayBicycleYes,
    OnewayBicycleNo,
    VehicleNo,
    VehiclePrivate,
    AccessNo,
    AccessPrivate,
    BicycleYes,
    BicycleNo,
    BicycleDesignated,
    BicycleDismount,
    BicycleUseSidepath,
    BicyclePermissive,
    BicyclePrivate,
    CyclewayOpposite,
    CyclewayOppositeLane,
    CyclewayOppositeTrack,
    MotorroadYes,
}

impl Attribute {
    /// Number of distinct attributes.
    pub const COUNT: usize = 62;

    /// All attributes, in bit-index order.
    pub const ALL: [Attribute; Attribute::COUNT] = [
        Attribute::HighwayService,
        Attribute::HighwayTrack,
        Attribute::HighwayResidential,
        Attribute::HighwayFootway,
        Attribute::HighwayPath,
        Attribute::HighwayUnclassified,
        Attribute::HighwayTertiary,
        Attribute::HighwaySecondary,
        Attribute::HighwayCycleway,
        Attribute::HighwayPrimary,
        Attribute::HighwayLivingStreet,
        Attribute::HighwaySteps,
        Attribute::HighwayPedestrian,
        Attribute::HighwayTrunk,
        Attribute::HighwayMotorwayLink,
        Attribute::HighwayTrunkLink,
        Attribute::HighwayPrimaryLink,
        Attribute::HighwaySecondaryLink,
        Attribute::HighwayTertiaryLink,
        Attribute::HighwayBridleway,
        Attribute::HighwayRoad,
        Attribute::HighwayMotorway,
        Attribute::TracktypeGrade1,
        Attribute::TracktypeGrade2,
        Attribute::TracktypeGrade3,
        Attribute::TracktypeGrade4,
        Attribute::TracktypeGrade5,
        Attribute::SurfaceAsphalt,
        Attribute::SurfaceUnpaved,
        Attribute::SurfaceGravel,
        Attribute::SurfacePaved,
        Attribute::SurfaceGround,
        Attribute::SurfaceCompacted,
        Attribute::SurfaceGrass,
        Attribute::SurfaceDirt,
        Attribute::SurfaceFineGravel,
        Attribute::SurfacePavingStones,
        Attribute::SurfaceConcrete,
        Attribute::SurfaceWood,
        Attribute::SurfaceSett,
        Attribute::SurfaceSand,
        Attribute::SurfaceCobblestone,
        Attribute::SurfaceMud,
        Attribute::OnewayYes,
        Attribute::OnewayM1,
        Attribute::OnewayBicycleYes,
        Attribute::OnewayBicycleNo,
        Attribute::VehicleNo,
        Attribute::VehiclePrivate,
        Attribute::AccessNo,
        Attribute::AccessPrivate,
        Attribute::BicycleYes,
        Attribute::BicycleNo,
        Attribute::BicycleDesignated,
        Attribute::BicycleDismount,
        Attribute::BicycleUseSidepath,
        Attribute::BicyclePermissive,
        Attribute::BicyclePrivate,
        Attribute::CyclewayOpposite,
        Attribute::CyclewayOppositeLane,
        Attribute::CyclewayOppositeTrack,
        Attribute::MotorroadYes,
    ];

    /// Bit index of this attribute inside an [`AttributeSet`].
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// The tag key, e.g. `highway`.
    pub fn key(self) -> &'static str {
        self.key_value().0
    }

    /// The tag value, e.g. `track`.
    pub fn value(self) -> &'static str {
        self.key_value().1
    }

    fn key_value(self) -> (&'static str, &'static str) {
        match self {
            Attribute::HighwayService => ("highway", "service"),
            Attribute::HighwayTrack => ("highway", "track"),
            Attribute::HighwayResidential => ("highway", "residential"),
            Attribute::HighwayFootway => ("highway", "footway"),
            Attribute::HighwayPath => ("highway", "path"),
            Attribute::HighwayUnclassified => ("highway", "unclassified"),
            Attribute::HighwayTertiary => ("highway", "tertiary"),
            Attribute::HighwaySecondary => ("highway", "secondary"),
            Attribute::HighwayCycleway => ("highway", "cycleway"),
            Attribute::HighwayPrimary => ("highway", "primary"),
            Attribute::HighwayLivingStreet => ("highway", "living_street"),
            Attribute::HighwaySteps => ("highway", "steps"),
            Attribute::HighwayPedestrian => ("highway", "pedestrian"),
            Attribute::HighwayTrunk => ("highway", "trunk"),
            Attribute::HighwayMotorwayLink => ("highway", "motorway_link"),
            Attribute::HighwayTrunkLink => ("highway", "trunk_link"),
            Attribute::HighwayPrimaryLink => ("highway", "primary_link"),
            Attribute::HighwaySecondaryLink => ("highway", "secondary_link"),
            Attribute::HighwayTertiaryLink => ("highway", "tertiary_link"),
            Attribute::HighwayBridleway => ("highway", "bridleway"),
            Attribute::HighwayRoad => ("highway", "road"),
            Attribute::HighwayMotorway => ("highway", "motorway"),
            Attribute::TracktypeGrade1 => ("tracktype", "grade1"),
            Attribute::TracktypeGrade2 => ("tracktype", "grade2"),
            Attribute::TracktypeGrade3 => ("tracktype", "grade3"),
            Attribute::TracktypeGrade4 => ("tracktype", "grade4"),
            Attribute::TracktypeGrade5 => ("tracktype", "grade5"),
            Attribute::SurfaceAsphalt => ("surface", "asphalt"),
            Attribute::SurfaceUnpaved => ("surface", "unpaved"),
            Attribute::SurfaceGravel => ("surface", "gravel"),
            Attribute::SurfacePaved => ("surface", "paved"),
            Attribute::SurfaceGround => ("surface", "ground"),
            Attribute::SurfaceCompacted => ("surface", "compacted"),
            Attribute::SurfaceGrass => ("surface", "grass"),
            Attribute::SurfaceDirt => ("surface", "dirt"),
            Attribute::SurfaceFineGravel => ("surface", "fine_gravel"),
            Attribute::SurfacePavingStones => ("surface", "paving_stones"),
            Attribute::SurfaceConcrete => ("surface", "concrete"),
            Attribute::SurfaceWood => ("surface", "wood"),
            Attribute::SurfaceSett => ("surface", "sett"),
            Attribute::SurfaceSand => ("surface", "sand"),
            Attribute::SurfaceCobblestone => ("surface", "cobblestone"),
            Attribute::SurfaceMud => ("surface", "mud"),
            Attribute::OnewayYes => ("oneway", "yes"),
            Attribute::OnewayM1 => ("oneway", "-1"),
            Attribute::OnewayBicycleYes => ("oneway:bicycle", "yes"),
            Attribute::OnewayBicycleNo => ("oneway:bicycle", "no"),
            Attribute::VehicleNo => ("vehicle", "no"),
            Attribute::VehiclePrivate => ("vehicle", "private"),
            Attribute::AccessNo => ("access", "no"),
            Attribute::AccessPrivate => ("access", "private"),
            Attribute::BicycleYes => ("bicycle", "yes"),
            Attribute::BicycleNo => ("bicycle", "no"),
            Attribute::BicycleDesignated => ("bicycle", "designated"),
            Attribute::BicycleDismount => ("bicycle", "dismount"),
            Attribute::BicycleUseSidepath => ("bicycle", "use_sidepath"),
            Attribute::BicyclePermissive => ("bicycle", "permissive"),
            Attribute::BicyclePrivate => ("bicycle", "private"),
            Attribute::CyclewayOpposite => ("cycleway", "opposite"),
            Attribute::CyclewayOppositeLane => ("cycleway", "opposite_lane"),
            Attribute::CyclewayOppositeTrack => ("cycleway", "opposite_track"),
            Attribute::MotorroadYes => ("motorroad", "yes"),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.value())
    }
}

/// A set of [`Attribute`]s stored as a 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeSet {
    bits: u64,
}

impl AttributeSet {
    /// The empty set.
    pub const EMPTY: AttributeSet = AttributeSet { bits: 0 };

    /// Create a set from its bit mask.
    ///
    /// # Errors
    ///
    /// Returns [`VeloError::InvalidArgument`] if a bit at or above
    /// [`Attribute::COUNT`] is set.
    pub fn new(bits: u64) -> Result<Self> {
        if bits >> Attribute::COUNT != 0 {
            return Err(VeloError::InvalidArgument(format!(
                "attribute set {bits:#x} has bits beyond the {} known attributes",
                Attribute::COUNT
            )));
        }
        Ok(Self { bits })
    }

    /// Create a set containing exactly `attributes` (duplicates are ignored).
    ///
    /// # Examples
    ///
    /// ```
    /// use velo::data::{Attribute, AttributeSet};
    ///
    /// let set = AttributeSet::of(&[Attribute::HighwayTrack, Attribute::SurfaceGravel]);
    /// assert!(set.contains(Attribute::HighwayTrack));
    /// assert!(!set.contains(Attribute::HighwayPrimary));
    /// ```
    pub fn of(attributes: &[Attribute]) -> Self {
        let bits = attributes
            .iter()
            .fold(0u64, |bits, attribute| bits | 1 << attribute.ordinal());
        Self { bits }
    }

    /// The bit mask of this set.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.bits & (1 << attribute.ordinal()) != 0
    }

    /// Whether this set and `other` have at least one attribute in common.
    pub fn intersects(&self, other: &AttributeSet) -> bool {
        self.bits & other.bits != 0
    }

    /// Iterate over the attributes of this set in bit-index order.
    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        Attribute::ALL
            .into_iter()
            .filter(move |attribute| self.contains(*attribute))
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, attribute) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{attribute}")?;
        }
        write!(f, "}}")
    }
}
