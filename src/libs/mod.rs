pub mod breakpoint;
pub mod io;
pub mod phylo;
pub mod synteny;
