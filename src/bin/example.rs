use dynamic_connectivity::DynamicConnectivity;

fn add_edge(g: &mut DynamicConnectivity<usize>, u: usize, v: usize) {
    println!("Adding edge from {} to {}", u, v);
    g.insert_edge(&u, &v);
}

fn rem_edge(g: &mut DynamicConnectivity<usize>, u: usize, v: usize) {
    println!("Removing edge from {} to {}", u, v);
    g.delete_edge(&u, &v);
}

fn check(g: &mut DynamicConnectivity<usize>, u: usize, v: usize) {
    println!(
        "Are {} and {} connected? {}",
        u,
        v,
        match g.connected(&u, &v) {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "Never heard of them",
        }
    );
}

fn main() {
    let mut g = DynamicConnectivity::from_vertices(0..10);
    for u in 0..9 {
        g.insert_edge(&u, &(u + 1));
    }
    println!("Created a path of length 10 (vertices 0 to 9)");
    check(&mut g, 0, 9);
    add_edge(&mut g, 0, 5);
    rem_edge(&mut g, 2, 3);
    check(&mut g, 0, 9);
    check(&mut g, 2, 3);
    rem_edge(&mut g, 4, 5);
    check(&mut g, 0, 9);
    check(&mut g, 3, 4);
    println!("Removing vertex 7");
    g.delete_vertex(&7);
    check(&mut g, 6, 8);
    check(&mut g, 0, 7);
}
