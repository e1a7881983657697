//! L-BFGS solver construction.
//!
//! The builders only set the history length and tolerances; the start point
//! and the iteration ceiling are runtime concerns applied in [`super::run`].
use crate::optimization::{
    conjugate_gradient::{Cost, Grad, Theta},
    errors::OptResult,
    lbfgs_backend::{
        options::LbfgsOptions,
        types::{HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS},
    },
};
use argmin::solver::quasinewton::LBFGS;

pub fn build_optimizer_hager_zhang(opts: &LbfgsOptions) -> OptResult<LbfgsHagerZhang> {
    configure_lbfgs(LBFGS::new(HagerZhangLS::new(), opts.mem), opts)
}

pub fn build_optimizer_more_thuente(opts: &LbfgsOptions) -> OptResult<LbfgsMoreThuente> {
    configure_lbfgs(LBFGS::new(MoreThuenteLS::new(), opts.mem), opts)
}

/// Apply the optional tolerances; argmin's own checks surface as `OptError`.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &LbfgsOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptError, lbfgs_backend::options::LineSearcher};

    #[test]
    fn builders_accept_default_options() {
        let opts = LbfgsOptions::default();

        assert!(build_optimizer_hager_zhang(&opts).is_ok());
        assert!(build_optimizer_more_thuente(&opts).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Tolerances that bypassed `LbfgsOptions::new` are still caught, by
    // argmin, and mapped into `OptError`.
    fn configure_lbfgs_maps_argmin_rejection() {
        let opts = LbfgsOptions {
            tol_grad: Some(-1.0),
            line_searcher: LineSearcher::HagerZhang,
            ..LbfgsOptions::default()
        };

        let result = build_optimizer_hager_zhang(&opts);

        assert!(matches!(result, Err(OptError::InvalidParameter { .. })));
    }
}
