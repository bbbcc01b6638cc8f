mod overlay;
mod proj;

pub(crate) use overlay::Intersection;
pub(crate) use proj::build_projection;
