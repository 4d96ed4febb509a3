use ring_heat::algs::communicator::{CommTag, Communicator, LocalComm, NoComm, Wait};
use ring_heat::algs::wire::{GHOST_BYTES, WireScalar};
use serial_test::serial;

#[test]
#[serial]
fn edge_values_arrive_in_step_order() {
    let tag = CommTag(0x1000);
    let (c0, c1) = (LocalComm::new(0, 2), LocalComm::new(1, 2));

    let edges: Vec<f64> = (0..10).map(|k| 0.5 * k as f64 - 1.0).collect();
    for &x in &edges {
        c0.isend(1, tag.base(), WireScalar::of(x).as_bytes());
    }
    let got: Vec<f64> = (0..edges.len())
        .map(|_| {
            let mut landing = [0u8; GHOST_BYTES];
            let raw = c1.irecv(0, tag.base(), &mut landing).wait().unwrap();
            WireScalar::decode(&raw).unwrap()
        })
        .collect();
    assert_eq!(got, edges);
}

#[test]
#[serial]
fn oversized_ghost_payload_reaches_the_decoder_whole() {
    let tag = CommTag(0x1002);
    let (c0, c1) = (LocalComm::new(0, 2), LocalComm::new(1, 2));

    let mut two_values = WireScalar::of(1.0).as_bytes().to_vec();
    two_values.extend_from_slice(WireScalar::of(2.0).as_bytes());
    c0.isend(1, tag.base(), &two_values);

    let mut landing = [0u8; GHOST_BYTES];
    let raw = c1.irecv(0, tag.base(), &mut landing).wait().unwrap();
    assert_eq!(raw.len(), 2 * GHOST_BYTES);
    assert_eq!(WireScalar::decode(&raw), Err(2 * GHOST_BYTES));
}

#[test]
#[serial]
fn tag_isolation_with_ghost_payloads() {
    let (c0, c1) = (LocalComm::new(0, 2), LocalComm::new(1, 2));
    const TAG_A: u16 = 0xA100;
    const TAG_B: u16 = 0xB200;

    let mut buf_a = [0u8; 8];
    let mut buf_b = [0u8; 8];
    let rxa = c1.irecv(0, TAG_A, &mut buf_a);
    let rxb = c1.irecv(0, TAG_B, &mut buf_b);

    c0.isend(1, TAG_B, WireScalar::of(-2.5).as_bytes());
    c0.isend(1, TAG_A, WireScalar::of(0.125).as_bytes());

    let ra = WireScalar::decode(&rxa.wait().expect("rxa")).unwrap();
    let rb = WireScalar::decode(&rxb.wait().expect("rxb")).unwrap();
    assert_eq!((ra, rb), (0.125, -2.5));
}

#[test]
fn ring_endpoints_know_their_place() {
    let comms = LocalComm::ring(4);
    for (r, c) in comms.iter().enumerate() {
        assert_eq!((c.rank(), c.size()), (r, 4));
        assert!(!c.is_no_comm());
    }
}

#[test]
fn every_rank_hears_both_neighbours() {
    let comms = LocalComm::ring(5);
    std::thread::scope(|s| {
        for c in &comms {
            s.spawn(move || {
                let me = c.rank();
                let n = c.size();
                let (left, right) = ((me + n - 1) % n, (me + 1) % n);
                c.isend(left, 9, &[me as u8]);
                c.isend(right, 9, &[me as u8]);
                let mut b = [0u8; 1];
                let from_right = c.irecv(right, 9, &mut b).wait().unwrap();
                let from_left = c.irecv(left, 9, &mut b).wait().unwrap();
                assert_eq!((from_left[0], from_right[0]), (left as u8, right as u8));
            });
        }
    });
}

#[test]
fn no_comm_is_nop() {
    let comm = NoComm;
    assert!(comm.is_no_comm());
    assert_eq!((comm.rank(), comm.size()), (0, 1));
    let mut buf = [0u8; 8];
    let h = comm.irecv(0, 123, &mut buf);
    assert!(h.wait().is_none());
    let s = comm.isend(0, 123, &[]);
    assert!(s.wait().is_none());
}

#[cfg(feature = "mpi-support")]
#[test]
fn mpi_comm_smoke_if_available() {
    use ring_heat::algs::communicator::MpiComm;
    let world = MpiComm::new().expect("MPI initialization failed");
    let me = world.rank();
    let n = world.size();
    const TAG: u16 = 0xCAFE;
    let to = (me + 1) % n;
    let from = (me + n - 1) % n;
    let tx = [42u8, me as u8, 0, 0];
    let mut rx = [0u8; 4];
    let r = world.irecv(from, TAG, &mut rx);
    let s = world.isend(to, TAG, &tx);
    let got = r.wait().expect("mpi rx");
    assert_eq!(got, [42u8, from as u8, 0, 0]);
    let _ = s.wait();
}
