// router selection (load balancing)

use thiserror::Error;

use crate::sf_interface::RouterIndex;
use crate::sf_router::Router;

/// Every router is at capacity
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("network is congested: all {routers} routers are full")]
pub struct Congestion {
    pub routers: usize,
}

pub trait RouterSelector {
    /// Pick the router that receives the next packet.
    /// Must not mutate anything; evaluated fresh for every packet.
    fn select(&self, routers: &[Router], capacity: usize) -> Result<RouterIndex, Congestion>;
}

/// Always picks the globally least loaded router, lowest index on ties
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastLoadedSelector;

impl RouterSelector for LeastLoadedSelector {
    fn select(&self, routers: &[Router], capacity: usize) -> Result<RouterIndex, Congestion> {
        let mut index = 0;
        let mut has_space = false;

        for (i, router) in routers.iter().enumerate() {
            // strict compare keeps the first of equal minima
            if router.len() < routers[index].len() {
                index = i;
            }
            if router.len() < capacity {
                has_space = true;
            }
        }

        if !has_space {
            return Err(Congestion {
                routers: routers.len(),
            });
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sf_packet::Packet;

    fn routers_with(lengths: &[usize], capacity: usize) -> Vec<Router> {
        let mut id = 0;
        lengths
            .iter()
            .map(|&len| {
                let mut router = Router::new(capacity);
                for _ in 0..len {
                    id += 1;
                    router.enqueue(Packet::new(id, 100, 1)).unwrap();
                }
                router
            })
            .collect()
    }

    #[test]
    fn test_picks_least_loaded() {
        let routers = routers_with(&[2, 3, 1, 2], 4);
        assert_eq!(LeastLoadedSelector.select(&routers, 4), Ok(2));
    }

    #[test]
    fn test_tie_break_lowest_index() {
        let routers = routers_with(&[1, 0, 1], 2);
        assert_eq!(LeastLoadedSelector.select(&routers, 2), Ok(1));

        let routers = routers_with(&[0, 0, 0], 2);
        assert_eq!(LeastLoadedSelector.select(&routers, 2), Ok(0));
    }

    #[test]
    fn test_congestion_leaves_routers_untouched() {
        let routers = routers_with(&[2, 2], 2);
        assert_eq!(
            LeastLoadedSelector.select(&routers, 2),
            Err(Congestion { routers: 2 })
        );
        assert!(routers.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_no_routers_is_congestion() {
        assert_eq!(
            LeastLoadedSelector.select(&[], 5),
            Err(Congestion { routers: 0 })
        );
    }

    #[test]
    fn test_zero_capacity_is_congestion() {
        let routers = routers_with(&[0, 0], 0);
        assert!(LeastLoadedSelector.select(&routers, 0).is_err());
    }
}
