mod carried;
