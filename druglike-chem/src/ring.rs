//! Ring detection: ring bonds via bridge finding, plus the smallest set of
//! smallest rings (SSSR).

use std::collections::VecDeque;

use crate::molecule::Molecule;

/// Ring membership of every atom and bond, plus the SSSR itself.
#[derive(Debug, Clone, Default)]
pub struct RingInfo {
    /// SSSR rings as atom index cycles.
    pub rings: Vec<Vec<usize>>,
    pub atom_in_ring: Vec<bool>,
    pub bond_in_ring: Vec<bool>,
}

impl RingInfo {
    /// Compute ring membership and the SSSR for a molecule.
    pub fn new(mol: &Molecule) -> Self {
        let bond_in_ring = find_ring_bonds(mol);
        let mut atom_in_ring = vec![false; mol.atom_count()];
        for (bi, bond) in mol.bonds.iter().enumerate() {
            if bond_in_ring[bi] {
                atom_in_ring[bond.atom1] = true;
                atom_in_ring[bond.atom2] = true;
            }
        }
        let rings = sssr_from_ring_bonds(mol, &bond_in_ring);
        RingInfo { rings, atom_in_ring, bond_in_ring }
    }

    /// Number of SSSR rings.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }
}

/// Find the smallest set of smallest rings (SSSR) in a molecule.
///
/// Returns a vector of rings, where each ring is a vector of atom indices.
pub fn find_sssr(mol: &Molecule) -> Vec<Vec<usize>> {
    let bond_in_ring = find_ring_bonds(mol);
    sssr_from_ring_bonds(mol, &bond_in_ring)
}

fn sssr_from_ring_bonds(mol: &Molecule, bond_in_ring: &[bool]) -> Vec<Vec<usize>> {
    if !bond_in_ring.iter().any(|&r| r) {
        return Vec::new();
    }

    // Expected number of rings = bonds - atoms + connected_components
    let expected_rings =
        mol.bond_count() as isize - mol.atom_count() as isize + count_components(mol) as isize;
    if expected_rings <= 0 {
        return Vec::new();
    }

    // For each ring bond, the shortest cycle through it is the bond plus the
    // shortest path between its ends that avoids it.
    let mut rings: Vec<Vec<usize>> = Vec::new();
    for (bond_idx, bond) in mol.bonds.iter().enumerate() {
        if !bond_in_ring[bond_idx] {
            continue;
        }
        if let Some(mut ring) = bfs_shortest_path(mol, bond.atom1, bond.atom2, bond_idx, bond_in_ring) {
            normalize_ring(&mut ring);
            if !rings.iter().any(|r| r == &ring) {
                rings.push(ring);
            }
        }
    }

    // Stable sort keeps discovery order among equal sizes, so output is deterministic.
    rings.sort_by_key(|r| r.len());
    rings.truncate(expected_rings as usize);
    rings
}

/// Mark every bond that lies on a cycle (i.e. is not a bridge).
///
/// Iterative Tarjan bridge search so deep chains cannot overflow the stack.
fn find_ring_bonds(mol: &Molecule) -> Vec<bool> {
    let n = mol.atom_count();
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut is_bridge = vec![false; mol.bond_count()];
    let mut timer = 0usize;

    for start in 0..n {
        if disc[start] != usize::MAX {
            continue;
        }
        disc[start] = timer;
        low[start] = timer;
        timer += 1;
        // (atom, bond used to reach it, next adjacency slot to explore)
        let mut stack: Vec<(usize, usize, usize)> = vec![(start, usize::MAX, 0)];

        while let Some(&(v, parent_bond, slot)) = stack.last() {
            if slot < mol.adjacency[v].len() {
                if let Some(top) = stack.last_mut() {
                    top.2 += 1;
                }
                let (w, bi) = mol.adjacency[v][slot];
                if bi == parent_bond {
                    continue;
                }
                if disc[w] == usize::MAX {
                    disc[w] = timer;
                    low[w] = timer;
                    timer += 1;
                    stack.push((w, bi, 0));
                } else {
                    low[v] = low[v].min(disc[w]);
                }
            } else {
                stack.pop();
                if let Some(&(u, _, _)) = stack.last() {
                    low[u] = low[u].min(low[v]);
                    if low[v] > disc[u] {
                        is_bridge[parent_bond] = true;
                    }
                }
            }
        }
    }

    is_bridge.into_iter().map(|b| !b).collect()
}

/// Count connected components.
fn count_components(mol: &Molecule) -> usize {
    let n = mol.atom_count();
    let mut visited = vec![false; n];
    let mut components = 0;

    for start in 0..n {
        if visited[start] {
            continue;
        }
        components += 1;
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited[start] = true;
        while let Some(curr) = queue.pop_front() {
            for &(neighbor, _) in &mol.adjacency[curr] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    components
}

/// BFS from `start` to `end` avoiding a specific bond, restricted to ring bonds.
fn bfs_shortest_path(
    mol: &Molecule,
    start: usize,
    end: usize,
    excluded_bond: usize,
    bond_in_ring: &[bool],
) -> Option<Vec<usize>> {
    let n = mol.atom_count();
    let mut visited = vec![false; n];
    let mut parent = vec![usize::MAX; n];
    let mut queue = VecDeque::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(curr) = queue.pop_front() {
        if curr == end {
            let mut path = Vec::new();
            let mut node = end;
            while node != start {
                path.push(node);
                node = parent[node];
            }
            path.push(start);
            path.reverse();
            return Some(path);
        }

        for &(neighbor, bond_idx) in &mol.adjacency[curr] {
            if bond_idx == excluded_bond || !bond_in_ring[bond_idx] {
                continue;
            }
            if !visited[neighbor] {
                visited[neighbor] = true;
                parent[neighbor] = curr;
                queue.push_back(neighbor);
            }
        }
    }

    None
}

/// Normalize a ring so it starts with the smallest index and proceeds
/// in the direction that gives the lexicographically smaller sequence.
fn normalize_ring(ring: &mut [usize]) {
    let Some(min_pos) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
    else {
        return;
    };

    ring.rotate_left(min_pos);

    let n = ring.len();
    if n > 2 && ring[n - 1] < ring[1] {
        ring[1..].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    #[test]
    fn benzene_one_ring() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        let rings = find_sssr(&mol);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 6);
    }

    #[test]
    fn naphthalene_two_rings() {
        let mol = parse_smiles("c1ccc2ccccc2c1").unwrap();
        let rings = find_sssr(&mol);
        assert_eq!(rings.len(), 2);
        for ring in &rings {
            assert_eq!(ring.len(), 6);
        }
    }

    #[test]
    fn acyclic_no_rings() {
        let mol = parse_smiles("CCCC").unwrap();
        let info = RingInfo::new(&mol);
        assert_eq!(info.ring_count(), 0);
        assert!(info.atom_in_ring.iter().all(|&r| !r));
    }

    #[test]
    fn biphenyl_link_is_not_a_ring_bond() {
        let mol = parse_smiles("c1ccccc1-c1ccccc1").unwrap();
        let info = RingInfo::new(&mol);
        assert_eq!(info.ring_count(), 2);
        let link = mol
            .bonds
            .iter()
            .position(|b| (b.atom1, b.atom2) == (5, 6))
            .unwrap();
        assert!(!info.bond_in_ring[link]);
        assert_eq!(info.bond_in_ring.iter().filter(|&&r| r).count(), 12);
        assert!(info.atom_in_ring.iter().all(|&r| r));
    }

    #[test]
    fn substituent_atoms_are_outside_rings() {
        // Toluene: methyl carbon is not a ring atom.
        let mol = parse_smiles("Cc1ccccc1").unwrap();
        let info = RingInfo::new(&mol);
        assert!(!info.atom_in_ring[0]);
        assert!(info.atom_in_ring[1]);
    }
}
