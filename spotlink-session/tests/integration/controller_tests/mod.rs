mod test_optimistic_reads;
