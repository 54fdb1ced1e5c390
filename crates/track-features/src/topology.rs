//! Child Topology Counting

use crate::config::TopologyMode;
use crate::error::FeatureError;
use event_data::{DataLabels, EventSource, ParticleId};
use serde::{Deserialize, Serialize};

/// Counts of a particle's children by hypothesis, plus grandchildren
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyCounts {
    pub tracks: u32,
    pub showers: u32,
    pub grandchildren: u32,
}

/// Count the direct children of `particle` by type, and their own children.
///
/// A child with neither hypothesis is counted in neither bucket.
pub fn count_children<S>(
    source: &S,
    particle: ParticleId,
    labels: &DataLabels,
    mode: TopologyMode,
) -> Result<TopologyCounts, FeatureError>
where
    S: EventSource + ?Sized,
{
    let mut counts = TopologyCounts::default();

    for child in source.children(particle, labels)? {
        let classified = match mode {
            TopologyMode::PerChild => child,
            TopologyMode::ParentQuirk => particle,
        };
        counts.tracks += u32::from(source.is_track_like(classified, labels)?);
        counts.showers += u32::from(source.is_shower_like(classified, labels)?);
        counts.grandchildren += source.child_count(child, labels)? as u32;
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_data::{InMemoryEvent, Particle};

    fn particle(id: ParticleId, pdg_code: i32, daughters: Vec<ParticleId>) -> Particle {
        Particle {
            id,
            pdg_code,
            parent: None,
            daughters,
        }
    }

    fn event(labels: &DataLabels) -> InMemoryEvent {
        let l = labels.particle.as_str();
        InMemoryEvent::new()
            .with_particle(l, particle(1, 13, vec![2, 3, 4, 5]))
            .with_particle(l, particle(2, 13, vec![6, 7]))
            .with_particle(l, particle(3, 11, vec![]))
            .with_particle(l, particle(4, 11, vec![8]))
            .with_particle(l, particle(5, 2112, vec![]))
            .with_particle(l, particle(6, 11, vec![]))
            .with_particle(l, particle(7, 11, vec![]))
            .with_particle(l, particle(8, 13, vec![]))
            .with_particle(l, particle(9, 13, vec![]))
    }

    #[test]
    fn test_no_children() {
        let labels = DataLabels::default();
        let counts = count_children(&event(&labels), 9, &labels, TopologyMode::PerChild).unwrap();
        assert_eq!(counts, TopologyCounts::default());
    }

    #[test]
    fn test_per_child_counts() {
        let labels = DataLabels::default();
        let counts = count_children(&event(&labels), 1, &labels, TopologyMode::PerChild).unwrap();
        assert_eq!(
            counts,
            TopologyCounts {
                tracks: 1,
                showers: 2,
                grandchildren: 3,
            }
        );
    }

    #[test]
    fn test_parent_quirk_counts_parent_hypothesis() {
        let labels = DataLabels::default();
        let counts = count_children(&event(&labels), 1, &labels, TopologyMode::ParentQuirk).unwrap();
        assert_eq!(
            counts,
            TopologyCounts {
                tracks: 4,
                showers: 0,
                grandchildren: 3,
            }
        );
    }

    #[test]
    fn test_unknown_child_propagates_error() {
        let labels = DataLabels::default();
        let event = InMemoryEvent::new().with_particle(&labels.particle, particle(1, 13, vec![42]));
        assert!(matches!(
            count_children(&event, 1, &labels, TopologyMode::PerChild),
            Err(FeatureError::DataAccess(_))
        ));
    }
}
