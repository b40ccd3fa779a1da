//! Periodic table data and element lookup.

/// A chemical element from the periodic table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    /// Standard (average) atomic weight in g/mol.
    pub atomic_weight: f64,
    /// Allowed valences for implicit-hydrogen assignment, lowest first.
    /// Empty for elements that never receive implicit hydrogens.
    pub valences: &'static [u8],
}

impl Element {
    /// Smallest allowed valence that accommodates `explicit` bond order.
    pub fn fitting_valence(&self, explicit: usize) -> Option<usize> {
        self.valences
            .iter()
            .map(|&v| v as usize)
            .find(|&v| v >= explicit)
    }

    /// Largest valence this element is allowed to reach.
    pub fn max_valence(&self) -> Option<usize> {
        self.valences.last().map(|&v| v as usize)
    }
}

const fn el(atomic_number: u8, symbol: &'static str, atomic_weight: f64, valences: &'static [u8]) -> Element {
    Element { atomic_number, symbol, atomic_weight, valences }
}

/// Elements 1–92 (H through U), indexed by atomic number minus one.
static ELEMENTS: [Element; 92] = [
    el(1, "H", 1.008, &[1]),
    el(2, "He", 4.003, &[]),
    el(3, "Li", 6.941, &[]),
    el(4, "Be", 9.012, &[]),
    el(5, "B", 10.812, &[3]),
    el(6, "C", 12.011, &[4]),
    el(7, "N", 14.007, &[3, 5]),
    el(8, "O", 15.999, &[2]),
    el(9, "F", 18.998, &[1]),
    el(10, "Ne", 20.180, &[]),
    el(11, "Na", 22.990, &[]),
    el(12, "Mg", 24.305, &[]),
    el(13, "Al", 26.982, &[]),
    el(14, "Si", 28.086, &[4]),
    el(15, "P", 30.974, &[3, 5]),
    el(16, "S", 32.067, &[2, 4, 6]),
    el(17, "Cl", 35.453, &[1]),
    el(18, "Ar", 39.948, &[]),
    el(19, "K", 39.098, &[]),
    el(20, "Ca", 40.078, &[]),
    el(21, "Sc", 44.956, &[]),
    el(22, "Ti", 47.867, &[]),
    el(23, "V", 50.942, &[]),
    el(24, "Cr", 51.996, &[]),
    el(25, "Mn", 54.938, &[]),
    el(26, "Fe", 55.845, &[]),
    el(27, "Co", 58.933, &[]),
    el(28, "Ni", 58.693, &[]),
    el(29, "Cu", 63.546, &[]),
    el(30, "Zn", 65.39, &[]),
    el(31, "Ga", 69.723, &[]),
    el(32, "Ge", 72.61, &[4]),
    el(33, "As", 74.922, &[3, 5]),
    el(34, "Se", 78.96, &[2, 4, 6]),
    el(35, "Br", 79.904, &[1]),
    el(36, "Kr", 83.80, &[]),
    el(37, "Rb", 85.468, &[]),
    el(38, "Sr", 87.62, &[]),
    el(39, "Y", 88.906, &[]),
    el(40, "Zr", 91.224, &[]),
    el(41, "Nb", 92.906, &[]),
    el(42, "Mo", 95.94, &[]),
    el(43, "Tc", 98.0, &[]),
    el(44, "Ru", 101.07, &[]),
    el(45, "Rh", 102.906, &[]),
    el(46, "Pd", 106.42, &[]),
    el(47, "Ag", 107.868, &[]),
    el(48, "Cd", 112.411, &[]),
    el(49, "In", 114.818, &[]),
    el(50, "Sn", 118.71, &[]),
    el(51, "Sb", 121.76, &[3, 5]),
    el(52, "Te", 127.6, &[2, 4, 6]),
    el(53, "I", 126.904, &[1, 3, 5]),
    el(54, "Xe", 131.29, &[]),
    el(55, "Cs", 132.905, &[]),
    el(56, "Ba", 137.327, &[]),
    el(57, "La", 138.905, &[]),
    el(58, "Ce", 140.116, &[]),
    el(59, "Pr", 140.908, &[]),
    el(60, "Nd", 144.24, &[]),
    el(61, "Pm", 145.0, &[]),
    el(62, "Sm", 150.36, &[]),
    el(63, "Eu", 151.964, &[]),
    el(64, "Gd", 157.25, &[]),
    el(65, "Tb", 158.925, &[]),
    el(66, "Dy", 162.50, &[]),
    el(67, "Ho", 164.930, &[]),
    el(68, "Er", 167.26, &[]),
    el(69, "Tm", 168.934, &[]),
    el(70, "Yb", 173.04, &[]),
    el(71, "Lu", 174.967, &[]),
    el(72, "Hf", 178.49, &[]),
    el(73, "Ta", 180.948, &[]),
    el(74, "W", 183.84, &[]),
    el(75, "Re", 186.207, &[]),
    el(76, "Os", 190.23, &[]),
    el(77, "Ir", 192.217, &[]),
    el(78, "Pt", 195.078, &[]),
    el(79, "Au", 196.967, &[]),
    el(80, "Hg", 200.59, &[]),
    el(81, "Tl", 204.383, &[]),
    el(82, "Pb", 207.2, &[]),
    el(83, "Bi", 208.980, &[]),
    el(84, "Po", 209.0, &[]),
    el(85, "At", 210.0, &[]),
    el(86, "Rn", 222.0, &[]),
    el(87, "Fr", 223.0, &[]),
    el(88, "Ra", 226.0, &[]),
    el(89, "Ac", 227.0, &[]),
    el(90, "Th", 232.038, &[]),
    el(91, "Pa", 231.036, &[]),
    el(92, "U", 238.029, &[]),
];

/// Exact masses of the isotopes that turn up in labelled drug SMILES, as
/// `(atomic number, mass number, mass)`.
static ISOTOPES: &[(u8, u16, f64)] = &[
    (1, 1, 1.007825),
    (1, 2, 2.014102),
    (1, 3, 3.016049),
    (6, 11, 11.011434),
    (6, 12, 12.0),
    (6, 13, 13.003355),
    (6, 14, 14.003242),
    (7, 13, 13.005739),
    (7, 14, 14.003074),
    (7, 15, 15.000109),
    (8, 15, 15.003066),
    (8, 16, 15.994915),
    (8, 17, 16.999132),
    (8, 18, 17.999160),
    (9, 18, 18.000938),
    (9, 19, 18.998403),
    (15, 31, 30.973762),
    (15, 32, 31.973908),
    (16, 32, 31.972071),
    (16, 33, 32.971459),
    (16, 34, 33.967867),
    (16, 35, 34.969032),
    (17, 35, 34.968853),
    (17, 36, 35.968307),
    (17, 37, 36.965903),
    (35, 76, 75.924542),
    (35, 79, 78.918338),
    (35, 81, 80.916291),
    (53, 123, 122.905598),
    (53, 124, 123.906211),
    (53, 125, 124.904630),
    (53, 127, 126.904473),
    (53, 131, 130.906125),
];

/// Look up an element by its symbol (e.g. "C", "Fe").
pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Look up an element by its atomic number.
pub fn element_by_number(n: u8) -> Option<&'static Element> {
    ELEMENTS.get(usize::from(n).checked_sub(1)?)
}

/// Exact mass of one isotope, if it is tabulated.
pub fn isotope_mass(atomic_number: u8, mass_number: u16) -> Option<f64> {
    ISOTOPES
        .iter()
        .find(|&&(z, a, _)| z == atomic_number && a == mass_number)
        .map(|&(_, _, mass)| mass)
}
