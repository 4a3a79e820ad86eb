mod test_grid_basic;
mod test_mesh_sanity;
mod test_surface_basic;
