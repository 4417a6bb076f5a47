pub mod dsa {
    pub mod graph;
    pub mod max_flow;
}

pub mod linear_algebra {
    pub mod matrix;
}

pub mod scientific_computing {
    pub mod statistics;
}

pub mod traffic_matrix;
