//! Cost factors applied to edge lengths during route search.

use std::sync::Arc;

use crate::data::{Attribute, AttributeSet, Graph};

/// Multiplier applied to the length of an edge when it is taken from a node.
///
/// Factors must be at least 1 for the search heuristic to stay admissible.
/// `f64::INFINITY` makes the edge impassable.
pub trait CostFunction: Send + Sync {
    fn cost_factor(&self, node_id: u32, edge_id: u32) -> f64;
}

impl<F> CostFunction for F
where
    F: Fn(u32, u32) -> f64 + Send + Sync,
{
    fn cost_factor(&self, node_id: u32, edge_id: u32) -> f64 {
        self(node_id, edge_id)
    }
}

/// Cost factors for a city bike, derived from the attributes of each edge.
///
/// - Ways a bicycle may not use are impassable: motorways and motor roads,
///   ways without a cyclable highway type, and ways closed to bicycles,
///   vehicles or the public (unless bicycles are explicitly allowed).
/// - One-way ways are impassable against their direction, unless they
///   carry a contraflow cycle lane or are two-way for bicycles.
/// - Otherwise the factor grows with traffic and with poor surfaces.
#[derive(Debug, Clone)]
pub struct CityBikeCostFunction {
    graph: Arc<Graph>,
    cyclable: AttributeSet,
    motor_only: AttributeSet,
    closed: AttributeSet,
    bicycle_allowed: AttributeSet,
    contraflow: AttributeSet,
    busy: AttributeSet,
    rough: AttributeSet,
    dismount: AttributeSet,
}

impl CityBikeCostFunction {
    pub fn new(graph: Arc<Graph>) -> Self {
        use Attribute::*;

        Self {
            graph,
            cyclable: AttributeSet::of(&[
                HighwayService,
                HighwayTrack,
                HighwayResidential,
                HighwayPath,
                HighwayUnclassified,
                HighwayTertiary,
                HighwaySecondary,
                HighwayCycleway,
                HighwayPrimary,
                HighwayLivingStreet,
                HighwayPrimaryLink,
                HighwaySecondaryLink,
                HighwayTertiaryLink,
                HighwayRoad,
            ]),
            motor_only: AttributeSet::of(&[
                HighwayMotorway,
                HighwayMotorwayLink,
                HighwayTrunk,
                HighwayTrunkLink,
                MotorroadYes,
            ]),
            closed: AttributeSet::of(&[
                VehicleNo,
                VehiclePrivate,
                AccessNo,
                AccessPrivate,
                BicycleNo,
                BicyclePrivate,
                BicycleUseSidepath,
            ]),
            bicycle_allowed: AttributeSet::of(&[BicycleYes, BicycleDesignated, BicyclePermissive]),
            contraflow: AttributeSet::of(&[
                OnewayBicycleNo,
                CyclewayOpposite,
                CyclewayOppositeLane,
                CyclewayOppositeTrack,
            ]),
            busy: AttributeSet::of(&[
                HighwayPrimary,
                HighwayPrimaryLink,
                HighwaySecondary,
                HighwaySecondaryLink,
            ]),
            rough: AttributeSet::of(&[
                TracktypeGrade3,
                TracktypeGrade4,
                TracktypeGrade5,
                SurfaceUnpaved,
                SurfaceGravel,
                SurfaceGround,
                SurfaceGrass,
                SurfaceDirt,
                SurfaceSand,
                SurfaceCobblestone,
                SurfaceMud,
            ]),
            dismount: AttributeSet::of(&[
                HighwayFootway,
                HighwayPedestrian,
                HighwaySteps,
                HighwayBridleway,
                BicycleDismount,
            ]),
        }
    }

    fn is_accessible(&self, attributes: &AttributeSet) -> bool {
        if attributes.intersects(&self.motor_only) {
            return false;
        }
        let allowed = attributes.intersects(&self.bicycle_allowed);
        if attributes.intersects(&self.closed) && !allowed {
            return false;
        }
        attributes.intersects(&self.cyclable) || attributes.intersects(&self.dismount) || allowed
    }

    fn is_wrong_way(&self, attributes: &AttributeSet, inverted: bool) -> bool {
        if attributes.intersects(&self.contraflow) {
            return false;
        }
        let forward_only = attributes.contains(Attribute::OnewayYes)
            || attributes.contains(Attribute::OnewayBicycleYes);
        let backward_only = attributes.contains(Attribute::OnewayM1);
        (forward_only && inverted) || (backward_only && !inverted)
    }
}

impl CostFunction for CityBikeCostFunction {
    fn cost_factor(&self, _node_id: u32, edge_id: u32) -> f64 {
        let attributes = self.graph.edge_attributes(edge_id);
        if !self.is_accessible(&attributes)
            || self.is_wrong_way(&attributes, self.graph.edge_is_inverted(edge_id))
        {
            return f64::INFINITY;
        }

        let cycle_friendly = attributes.contains(Attribute::HighwayCycleway)
            || attributes.contains(Attribute::BicycleDesignated);
        let mut factor = 1.0;
        if attributes.intersects(&self.busy) && !cycle_friendly {
            factor *= 1.5;
        }
        if attributes.intersects(&self.rough) {
            factor *= 2.0;
        }
        if attributes.intersects(&self.dismount) && !cycle_friendly {
            factor *= 3.0;
        }
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture::GraphFixture;
    use Attribute::*;

    const E: f64 = 2_600_000.0;
    const N: f64 = 1_200_000.0;

    /// One edge per attribute set, all from node 0 to node 1; the last edge is
    /// inverted.
    fn cost_of(sets: &[&[Attribute]]) -> Vec<f64> {
        let mut fixture = GraphFixture::new().node(E, N).node(E + 10.0, N);
        for set in sets {
            fixture = fixture.attribute_set(AttributeSet::of(set));
        }
        let count = sets.len() as u16;
        for index in 0..count {
            fixture = fixture.edge_with_attributes(0, 1, 10.0, index);
        }
        for index in 0..count {
            fixture = fixture.inverted_edge(0, 1, 10.0, index);
        }
        let function = CityBikeCostFunction::new(Arc::new(fixture.build()));
        (0..2 * count as u32)
            .map(|edge_id| function.cost_factor(0, edge_id))
            .collect()
    }

    #[test]
    fn test_closure_cost_function() {
        let function = |_node: u32, edge: u32| if edge == 3 { f64::INFINITY } else { 1.0 };
        assert_eq!(function.cost_factor(0, 2), 1.0);
        assert_eq!(function.cost_factor(0, 3), f64::INFINITY);
    }

    #[test]
    fn test_accessibility() {
        let costs = cost_of(&[
            &[HighwayResidential],
            &[HighwayMotorway],
            &[],
            &[HighwayResidential, AccessNo],
            &[HighwayResidential, AccessNo, BicycleYes],
        ]);
        assert_eq!(&costs[..5], &[1.0, f64::INFINITY, f64::INFINITY, f64::INFINITY, 1.0]);
    }

    #[test]
    fn test_one_way() {
        let costs = cost_of(&[
            &[HighwayResidential, OnewayYes],
            &[HighwayResidential, OnewayM1],
            &[HighwayResidential, OnewayYes, CyclewayOppositeLane],
        ]);
        // Travelled along the way.
        assert_eq!(&costs[..3], &[1.0, f64::INFINITY, 1.0]);
        // Travelled against it.
        assert_eq!(&costs[3..], &[f64::INFINITY, 1.0, 1.0]);
    }

    #[test]
    fn test_penalties() {
        let costs = cost_of(&[
            &[HighwayPrimary],
            &[HighwayPrimary, BicycleDesignated],
            &[HighwayTrack, TracktypeGrade4],
            &[HighwaySteps],
            &[HighwayCycleway, SurfaceGravel],
        ]);
        assert_eq!(&costs[..5], &[1.5, 1.0, 2.0, 3.0, 2.0]);
        assert!(costs.iter().all(|&c| c >= 1.0));
    }
}
