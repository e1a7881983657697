//! lbfgs_backend::types — argmin solver aliases over the crate's numeric types.
use crate::optimization::conjugate_gradient::{Cost, Grad, Theta};
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};

/// Default L-BFGS history length.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Default iteration ceiling for the L-BFGS backend.
pub const DEFAULT_LBFGS_MAX_ITER: usize = 300;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
