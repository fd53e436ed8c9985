use phf::{Map, phf_map};

/// Atomic number and standard atomic weight (u) keyed by element symbol.
///
/// Elements without a standard atomic weight carry the mass of their most
/// stable known isotope.
static ELEMENTS: Map<&'static str, (u8, f64)> = phf_map! {
    "H" => (1, 1.008), "He" => (2, 4.002602), "Li" => (3, 6.94), "Be" => (4, 9.0121831),
    "B" => (5, 10.81), "C" => (6, 12.011), "N" => (7, 14.007), "O" => (8, 15.999),
    "F" => (9, 18.998403163), "Ne" => (10, 20.1797), "Na" => (11, 22.98976928),
    "Mg" => (12, 24.305), "Al" => (13, 26.9815385), "Si" => (14, 28.085),
    "P" => (15, 30.973761998), "S" => (16, 32.06), "Cl" => (17, 35.45), "Ar" => (18, 39.948),
    "K" => (19, 39.0983), "Ca" => (20, 40.078), "Sc" => (21, 44.955908), "Ti" => (22, 47.867),
    "V" => (23, 50.9415), "Cr" => (24, 51.9961), "Mn" => (25, 54.938044), "Fe" => (26, 55.845),
    "Co" => (27, 58.933194), "Ni" => (28, 58.6934), "Cu" => (29, 63.546), "Zn" => (30, 65.38),
    "Ga" => (31, 69.723), "Ge" => (32, 72.63), "As" => (33, 74.921595), "Se" => (34, 78.971),
    "Br" => (35, 79.904), "Kr" => (36, 83.798), "Rb" => (37, 85.4678), "Sr" => (38, 87.62),
    "Y" => (39, 88.90584), "Zr" => (40, 91.224), "Nb" => (41, 92.90637), "Mo" => (42, 95.95),
    "Tc" => (43, 97.9072124), "Ru" => (44, 101.07), "Rh" => (45, 102.9055), "Pd" => (46, 106.42),
    "Ag" => (47, 107.8682), "Cd" => (48, 112.414), "In" => (49, 114.818), "Sn" => (50, 118.71),
    "Sb" => (51, 121.76), "Te" => (52, 127.6), "I" => (53, 126.90447), "Xe" => (54, 131.293),
    "Cs" => (55, 132.90545196), "Ba" => (56, 137.327), "La" => (57, 138.90547),
    "Ce" => (58, 140.116), "Pr" => (59, 140.90766), "Nd" => (60, 144.242),
    "Pm" => (61, 144.9127559), "Sm" => (62, 150.36), "Eu" => (63, 151.964), "Gd" => (64, 157.25),
    "Tb" => (65, 158.92535), "Dy" => (66, 162.5), "Ho" => (67, 164.93033), "Er" => (68, 167.259),
    "Tm" => (69, 168.93422), "Yb" => (70, 173.054), "Lu" => (71, 174.9668), "Hf" => (72, 178.49),
    "Ta" => (73, 180.94788), "W" => (74, 183.84), "Re" => (75, 186.207), "Os" => (76, 190.23),
    "Ir" => (77, 192.217), "Pt" => (78, 195.084), "Au" => (79, 196.966569), "Hg" => (80, 200.592),
    "Tl" => (81, 204.38), "Pb" => (82, 207.2), "Bi" => (83, 208.9804), "Po" => (84, 208.9824308),
    "At" => (85, 209.9871479), "Rn" => (86, 222.0175782), "Fr" => (87, 223.019736),
    "Ra" => (88, 226.0254103), "Ac" => (89, 227.0277523), "Th" => (90, 232.0377),
    "Pa" => (91, 231.03588), "U" => (92, 238.02891), "Np" => (93, 237.0481736),
    "Pu" => (94, 244.0642053), "Am" => (95, 243.0613813), "Cm" => (96, 247.0703541),
    "Bk" => (97, 247.0703073), "Cf" => (98, 251.0795886), "Es" => (99, 252.08298),
    "Fm" => (100, 257.0951061), "Md" => (101, 258.0984315), "No" => (102, 259.10103),
    "Lr" => (103, 262.10961), "Rf" => (104, 267.12179), "Db" => (105, 268.12567),
    "Sg" => (106, 271.13393), "Bh" => (107, 272.13826), "Hs" => (108, 270.13429),
    "Mt" => (109, 276.15159), "Ds" => (110, 281.16451), "Rg" => (111, 280.16514),
    "Cn" => (112, 285.17712), "Nh" => (113, 284.17873), "Fl" => (114, 289.19042),
    "Mc" => (115, 288.19274), "Lv" => (116, 293.20449), "Ts" => (117, 292.20746),
    "Og" => (118, 294.21392),
};

/// Returns the standard atomic mass of an element, if tabulated.
pub fn atomic_mass(element: &str) -> Option<f64> {
    ELEMENTS.get(element.trim()).map(|&(_, mass)| mass)
}

pub fn atomic_number(element: &str) -> Option<u8> {
    ELEMENTS.get(element.trim()).map(|&(number, _)| number)
}

pub fn atomic_symbol(number: u8) -> Option<&'static str> {
    ELEMENTS
        .entries()
        .find(|(_, (n, _))| *n == number)
        .map(|(symbol, _)| *symbol)
}
