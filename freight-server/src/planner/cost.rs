//! Edge cost model.
//!
//! Scores the move between two transport nodes: which mode carries it,
//! what it costs, how long it takes and how far it goes. The model is a
//! pure function of the two nodes and the [`CostModel`] constants.

use crate::domain::{EdgeCost, NodeKind, TransportMode, TransportNode};

use super::config::CostModel;

/// Score the leg from `a` to `b`.
///
/// - Port/airport pairs within the intermodal radius are a same-city
///   transfer: flat fee, flat duration, raw great-circle distance.
/// - Airport to airport flies: per-km air cost, air speed plus airport
///   handling.
/// - Port to port sails over the inflated sea distance: per-km sea cost,
///   sea speed plus port handling.
/// - Port/airport pairs further apart fly, paying the transfer fee and
///   transfer time on top of the air leg.
pub fn score_edge(a: &TransportNode, b: &TransportNode, model: &CostModel) -> EdgeCost {
    let dist = a.distance_km(b);

    if a.kind() != b.kind() && dist < model.intermodal_radius_km {
        return EdgeCost {
            mode: TransportMode::Intermodal,
            cost: model.intermodal_fee,
            time_hours: model.intermodal_hours,
            distance_km: dist,
        };
    }

    match (a.kind(), b.kind()) {
        (NodeKind::Air, NodeKind::Air) => EdgeCost {
            mode: TransportMode::Air,
            cost: dist * model.air_cost_per_km,
            time_hours: dist / model.air_speed_kmh + model.airport_handling_hours,
            distance_km: dist,
        },
        (NodeKind::Sea, NodeKind::Sea) => {
            let sea_dist = dist * model.sea_routing_factor;
            EdgeCost {
                mode: TransportMode::Sea,
                cost: sea_dist * model.sea_cost_per_km,
                time_hours: sea_dist / model.sea_speed_kmh + model.port_handling_hours,
                distance_km: sea_dist,
            }
        }
        (NodeKind::Sea, NodeKind::Air) | (NodeKind::Air, NodeKind::Sea) => EdgeCost {
            mode: TransportMode::Air,
            cost: dist * model.air_cost_per_km + model.intermodal_fee,
            time_hours: dist / model.air_speed_kmh + model.intermodal_hours,
            distance_km: dist,
        },
    }
}
